//! Per-account claim resolution.
//!
//! `resolve` drives a [`RewardClient`] through one account's claim attempt
//! and metadata lookups and always produces exactly one [`ClaimResult`].
//! Every remote failure is absorbed here: the row degrades to `Failed` with
//! one diagnostic naming the label, and nothing escapes to the caller.

use crate::claim::{mask_uid, ClaimResult, ClaimStatus};
use crate::client::{ClaimOutcome, ClientError, GameAccount, RewardClient, GAME_TITLE};
use crate::credential::CredentialRecord;
use crate::diag::DiagnosticSink;

/// Claim today's reward for one account and look up its display metadata.
pub async fn resolve(
    client: &dyn RewardClient,
    cred: &CredentialRecord,
    sink: &dyn DiagnosticSink,
) -> ClaimResult {
    // Step 1: attempt the claim. Auth failures stop here so no further
    // calls are made with cookies known to be bad.
    let status = match client.attempt_claim(cred).await {
        Ok(ClaimOutcome::Claimed) => ClaimStatus::Claimed,
        Ok(ClaimOutcome::AlreadyClaimed) => ClaimStatus::AlreadyClaimed,
        Err(ClientError::InvalidCredentials) => {
            sink.log(&format!(
                "{}: invalid session cookies, check ltuid and ltoken",
                cred.label
            ));
            return ClaimResult::failed(&cred.label);
        }
        Err(e) => {
            sink.log(&format!("{}: claim failed: {}", cred.label, e));
            return ClaimResult::failed(&cred.label);
        }
    };

    // Step 2: enrich with account metadata. A failure here degrades the
    // whole row rather than reporting a half-populated claim.
    match enrich(client, cred, status).await {
        Ok(result) => result,
        Err(detail) => {
            sink.log(&format!("{}: account lookup failed: {}", cred.label, detail));
            ClaimResult::failed(&cred.label)
        }
    }
}

async fn enrich(
    client: &dyn RewardClient,
    cred: &CredentialRecord,
    status: ClaimStatus,
) -> Result<ClaimResult, String> {
    let accounts = client
        .game_accounts(cred)
        .await
        .map_err(|e| e.to_string())?;
    let account =
        best_account(&accounts).ok_or_else(|| "no game account bound to this session".to_string())?;

    let cycle = client.reward_cycle(cred).await.map_err(|e| e.to_string())?;
    let rewards = client
        .monthly_rewards(cred)
        .await
        .map_err(|e| e.to_string())?;

    // 1-based cycle day indexes the catalog at day - 1
    let index = (cycle.signed_days as usize)
        .checked_sub(1)
        .ok_or_else(|| "reward cycle reported day 0".to_string())?;
    let reward = rewards.get(index).ok_or_else(|| {
        format!(
            "day {} has no entry in the {}-entry reward catalog",
            cycle.signed_days,
            rewards.len()
        )
    })?;

    Ok(ClaimResult {
        label: cred.label.clone(),
        uid: mask_uid(&account.uid),
        nickname: account.nickname.clone(),
        level: account.level.to_string(),
        server: trim_region(&account.server_name).to_string(),
        day: cycle.signed_days.to_string(),
        status,
        reward: format!("{} x{}", reward.name, reward.amount),
    })
}

/// Highest-level account with the matching title tag.
///
/// On a level tie the first entry in list order wins. An explicit fold
/// rather than `max_by_key`, which keeps the last maximum and would flip
/// the tie-break.
fn best_account(accounts: &[GameAccount]) -> Option<&GameAccount> {
    accounts
        .iter()
        .filter(|account| account.title == GAME_TITLE)
        .fold(None::<&GameAccount>, |best, account| match best {
            Some(current) if current.level >= account.level => Some(current),
            _ => Some(account),
        })
}

/// Drop the trailing qualifier word from a region label
/// ("America Server" -> "America"); single-word labels pass through.
fn trim_region(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.rsplit_once(' ') {
        Some((head, _)) => head,
        None => trimmed,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
