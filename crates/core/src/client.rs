//! Reward client abstraction.
//!
//! A `RewardClient` talks to the remote account API on behalf of one
//! credential record at a time: claim today's reward, list bound game
//! accounts, and read the monthly reward cycle. The live HTTP implementation
//! lives in [`crate::hoyolab`]; [`StaticRewardClient`] answers from scripted
//! state for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::credential::CredentialRecord;

/// `game_biz` tag of accounts that participate in check-in.
pub const GAME_TITLE: &str = "hk4e_global";

// ──────────────────────────────────────────────
// Outcomes and errors
// ──────────────────────────────────────────────

/// Result of a claim attempt that reached the API successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// This call performed today's claim.
    Claimed,
    /// Today's reward was claimed by an earlier call in the same cycle.
    AlreadyClaimed,
}

/// Errors a reward client can return.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The session cookies were rejected. Distinguished so the resolver can
    /// name the offending account without retrying the remaining calls.
    #[error("invalid or expired session cookies")]
    InvalidCredentials,

    /// The endpoint answered with a non-success business code.
    #[error("api error (retcode {retcode}): {message}")]
    Api { retcode: i32, message: String },

    /// Network, TLS, decode, or task-join failure.
    #[error("transport error: {message}")]
    Transport { message: String },
}

// ──────────────────────────────────────────────
// Payload records
// ──────────────────────────────────────────────

/// One game account bound to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAccount {
    pub uid: String,
    pub level: u32,
    pub nickname: String,
    /// Raw region label as the API reports it (e.g. "America Server").
    pub server_name: String,
    /// Title tag; only [`GAME_TITLE`] entries participate in selection.
    pub title: String,
}

/// Position within the current monthly check-in cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardCycle {
    pub month: u8,
    /// 1-based day index; indexes the monthly catalog at `signed_days - 1`.
    pub signed_days: u32,
}

/// One entry of the monthly reward catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardItem {
    pub name: String,
    pub amount: u32,
}

// ──────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────

/// Client for the remote reward API, one credential record per call.
///
/// All methods are network-bound on the live implementation. Each call
/// authenticates independently, so any of them can fail with
/// [`ClientError::InvalidCredentials`].
#[async_trait]
pub trait RewardClient: Send + Sync {
    /// Attempt today's claim. Request-only: no reward payload is read back.
    async fn attempt_claim(&self, cred: &CredentialRecord) -> Result<ClaimOutcome, ClientError>;

    /// List the game accounts bound to this session.
    async fn game_accounts(&self, cred: &CredentialRecord)
        -> Result<Vec<GameAccount>, ClientError>;

    /// Read the current position in the monthly cycle.
    async fn reward_cycle(&self, cred: &CredentialRecord) -> Result<RewardCycle, ClientError>;

    /// Read the full monthly reward catalog, ordered by cycle day.
    async fn monthly_rewards(&self, cred: &CredentialRecord)
        -> Result<Vec<RewardItem>, ClientError>;
}

// ──────────────────────────────────────────────
// StaticRewardClient
// ──────────────────────────────────────────────

/// Scripted per-account state backing [`StaticRewardClient`].
#[derive(Debug, Clone)]
pub struct StaticAccountState {
    /// When false, every call answers `InvalidCredentials`.
    pub valid: bool,
    /// Whether today's reward was claimed before this run started.
    pub claimed_today: bool,
    /// When true, metadata calls fail with a transport error while the
    /// claim call still works. Models a mid-run network drop.
    pub fail_metadata: bool,
    pub accounts: Vec<GameAccount>,
    pub cycle: RewardCycle,
    pub rewards: Vec<RewardItem>,
}

impl Default for StaticAccountState {
    fn default() -> Self {
        StaticAccountState {
            valid: true,
            claimed_today: false,
            fail_metadata: false,
            accounts: Vec::new(),
            cycle: RewardCycle {
                month: 1,
                signed_days: 1,
            },
            rewards: Vec::new(),
        }
    }
}

/// A reward client that answers from scripted state, keyed by `ltuid`.
///
/// Claim attempts mutate the script: the first claim on an unclaimed
/// account returns [`ClaimOutcome::Claimed`] and marks it claimed, so a
/// second attempt in the same run returns `AlreadyClaimed`. Useful for
/// tests and scenarios where no network is available.
#[derive(Default)]
pub struct StaticRewardClient {
    accounts: Mutex<HashMap<String, StaticAccountState>>,
}

impl StaticRewardClient {
    pub fn new() -> Self {
        StaticRewardClient::default()
    }

    /// Register scripted state for the given `ltuid`.
    pub fn insert(&self, ltuid: &str, state: StaticAccountState) {
        self.accounts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(ltuid.to_string(), state);
    }

    fn with_state<T>(
        &self,
        cred: &CredentialRecord,
        f: impl FnOnce(&mut StaticAccountState) -> Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        let state = accounts
            .get_mut(&cred.ltuid)
            .ok_or(ClientError::InvalidCredentials)?;
        if !state.valid {
            return Err(ClientError::InvalidCredentials);
        }
        f(state)
    }

    fn metadata_guard(state: &StaticAccountState) -> Result<(), ClientError> {
        if state.fail_metadata {
            return Err(ClientError::Transport {
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RewardClient for StaticRewardClient {
    async fn attempt_claim(&self, cred: &CredentialRecord) -> Result<ClaimOutcome, ClientError> {
        self.with_state(cred, |state| {
            if state.claimed_today {
                Ok(ClaimOutcome::AlreadyClaimed)
            } else {
                state.claimed_today = true;
                Ok(ClaimOutcome::Claimed)
            }
        })
    }

    async fn game_accounts(
        &self,
        cred: &CredentialRecord,
    ) -> Result<Vec<GameAccount>, ClientError> {
        self.with_state(cred, |state| {
            Self::metadata_guard(state)?;
            Ok(state.accounts.clone())
        })
    }

    async fn reward_cycle(&self, cred: &CredentialRecord) -> Result<RewardCycle, ClientError> {
        self.with_state(cred, |state| {
            Self::metadata_guard(state)?;
            Ok(state.cycle)
        })
    }

    async fn monthly_rewards(
        &self,
        cred: &CredentialRecord,
    ) -> Result<Vec<RewardItem>, ClientError> {
        self.with_state(cred, |state| {
            Self::metadata_guard(state)?;
            Ok(state.rewards.clone())
        })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
