//! Live HTTP implementation of [`RewardClient`] against the HoYoLAB API.
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` to avoid
//! blocking the async runtime. Every endpoint answers a
//! `{retcode, message, data}` envelope; non-zero retcodes map into the
//! [`ClientError`] taxonomy, with the invalid-cookie family distinguished so
//! the resolver can stop early.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::{
    ClaimOutcome, ClientError, GameAccount, RewardClient, RewardCycle, RewardItem,
};
use crate::credential::CredentialRecord;

/// Daily check-in event endpoints.
const ACT_API_URL: &str = "https://sg-hk4e-api.hoyolab.com/event/sol";

/// Account binding endpoint (game roles bound to a session).
const ROLES_API_URL: &str =
    "https://api-account-os.hoyolab.com/binding/api/getUserGameRolesByCookie";

/// Activity id of the daily check-in event.
const ACT_ID: &str = "e202102251931481";

/// Retcode answered when today's reward was already claimed.
const RETCODE_ALREADY_SIGNED: i32 = -5003;

/// Retcodes answered for missing, malformed, or expired cookies.
const RETCODES_INVALID_COOKIE: [i32; 3] = [-100, 10001, 10103];

// ──────────────────────────────────────────────
// Wire types
// ──────────────────────────────────────────────

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    retcode: i32,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct SignInfo {
    total_sign_day: u32,
    today: String,
}

#[derive(Debug, Deserialize)]
struct HomeInfo {
    awards: Vec<Award>,
}

#[derive(Debug, Deserialize)]
struct Award {
    name: String,
    cnt: u32,
}

#[derive(Debug, Deserialize)]
struct RoleList {
    list: Vec<Role>,
}

#[derive(Debug, Deserialize)]
struct Role {
    game_uid: String,
    level: u32,
    nickname: String,
    region_name: String,
    game_biz: String,
}

// ──────────────────────────────────────────────
// Retcode handling
// ──────────────────────────────────────────────

fn is_invalid_cookie(retcode: i32) -> bool {
    RETCODES_INVALID_COOKIE.contains(&retcode)
}

/// Unwrap an envelope into its data, mapping non-success retcodes.
fn unwrap_data<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
    if is_invalid_cookie(envelope.retcode) {
        return Err(ClientError::InvalidCredentials);
    }
    if envelope.retcode != 0 {
        return Err(ClientError::Api {
            retcode: envelope.retcode,
            message: envelope.message,
        });
    }
    envelope.data.ok_or_else(|| ClientError::Transport {
        message: "response envelope carried no data".to_string(),
    })
}

/// Map a claim envelope's retcode to an outcome.
fn claim_outcome(retcode: i32, message: String) -> Result<ClaimOutcome, ClientError> {
    match retcode {
        0 => Ok(ClaimOutcome::Claimed),
        RETCODE_ALREADY_SIGNED => Ok(ClaimOutcome::AlreadyClaimed),
        r if is_invalid_cookie(r) => Err(ClientError::InvalidCredentials),
        r => Err(ClientError::Api {
            retcode: r,
            message,
        }),
    }
}

// ──────────────────────────────────────────────
// HoyolabClient
// ──────────────────────────────────────────────

/// Live reward client for one language tag.
///
/// Stateless apart from the language; the per-call credentials carry all
/// session identity, so a single client instance serves the whole batch.
pub struct HoyolabClient {
    lang: String,
}

impl HoyolabClient {
    /// Create a client for a language tag already validated by the caller.
    pub fn new(lang: &str) -> Self {
        HoyolabClient {
            lang: lang.to_string(),
        }
    }

    fn cookie_header(cred: &CredentialRecord) -> String {
        format!("ltuid={}; ltoken={}", cred.ltuid, cred.ltoken)
    }

    /// Run a blocking GET and decode the envelope off the async runtime.
    async fn get_envelope<T>(url: String, cookie: String) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let agent = ureq::Agent::new_with_defaults();
            let response = agent
                .get(&url)
                .header("Cookie", &cookie)
                .call()
                .map_err(|e| ClientError::Transport {
                    message: e.to_string(),
                })?;

            response
                .into_body()
                .read_json()
                .map_err(|e| ClientError::Transport {
                    message: format!("failed to parse response as JSON: {}", e),
                })
        })
        .await
        .map_err(|e| ClientError::Transport {
            message: format!("task join error: {}", e),
        })?
    }
}

#[async_trait]
impl RewardClient for HoyolabClient {
    async fn attempt_claim(&self, cred: &CredentialRecord) -> Result<ClaimOutcome, ClientError> {
        let url = format!("{}/sign?lang={}", ACT_API_URL, self.lang);
        let cookie = Self::cookie_header(cred);

        let envelope: Envelope<serde_json::Value> = tokio::task::spawn_blocking(move || {
            let agent = ureq::Agent::new_with_defaults();
            let response = agent
                .post(&url)
                .header("Cookie", &cookie)
                .send_json(&serde_json::json!({ "act_id": ACT_ID }))
                .map_err(|e| ClientError::Transport {
                    message: e.to_string(),
                })?;

            response
                .into_body()
                .read_json()
                .map_err(|e| ClientError::Transport {
                    message: format!("failed to parse response as JSON: {}", e),
                })
        })
        .await
        .map_err(|e| ClientError::Transport {
            message: format!("task join error: {}", e),
        })??;

        claim_outcome(envelope.retcode, envelope.message)
    }

    async fn game_accounts(
        &self,
        cred: &CredentialRecord,
    ) -> Result<Vec<GameAccount>, ClientError> {
        let url = format!("{}?game_biz={}", ROLES_API_URL, crate::client::GAME_TITLE);
        let envelope: Envelope<RoleList> =
            Self::get_envelope(url, Self::cookie_header(cred)).await?;
        let roles = unwrap_data(envelope)?;

        Ok(roles
            .list
            .into_iter()
            .map(|role| GameAccount {
                uid: role.game_uid,
                level: role.level,
                nickname: role.nickname,
                server_name: role.region_name,
                title: role.game_biz,
            })
            .collect())
    }

    async fn reward_cycle(&self, cred: &CredentialRecord) -> Result<RewardCycle, ClientError> {
        let url = format!("{}/info?act_id={}&lang={}", ACT_API_URL, ACT_ID, self.lang);
        let envelope: Envelope<SignInfo> =
            Self::get_envelope(url, Self::cookie_header(cred)).await?;
        let info = unwrap_data(envelope)?;

        Ok(RewardCycle {
            month: parse_month(&info.today),
            signed_days: info.total_sign_day,
        })
    }

    async fn monthly_rewards(
        &self,
        cred: &CredentialRecord,
    ) -> Result<Vec<RewardItem>, ClientError> {
        let url = format!("{}/home?act_id={}&lang={}", ACT_API_URL, ACT_ID, self.lang);
        let envelope: Envelope<HomeInfo> =
            Self::get_envelope(url, Self::cookie_header(cred)).await?;
        let home = unwrap_data(envelope)?;

        Ok(home
            .awards
            .into_iter()
            .map(|award| RewardItem {
                name: award.name,
                amount: award.cnt,
            })
            .collect())
    }
}

/// Month number from the `today` field ("2026-08-07" -> 8).
///
/// The month is informational only, so an unexpected shape degrades to 0
/// rather than failing the account's run.
fn parse_month(today: &str) -> u8 {
    today
        .split('-')
        .nth(1)
        .and_then(|m| m.parse().ok())
        .unwrap_or(0)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
