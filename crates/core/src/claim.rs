//! Claim outcome records and identifier masking.

use std::fmt;

/// Placeholder for any field a failed or partial lookup could not resolve.
pub const UNKNOWN: &str = "?";

/// Fixed-width redaction marker used when masking account ids.
pub const MASK: &str = "■■■■■■";

// ──────────────────────────────────────────────
// ClaimStatus
// ──────────────────────────────────────────────

/// What this run did for one account.
///
/// `Claimed` means this invocation performed the claim; `AlreadyClaimed`
/// means a prior call in the same cycle did; `Failed` means the account
/// could not be processed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Claimed,
    AlreadyClaimed,
    Failed,
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimStatus::Claimed => write!(f, "claimed"),
            ClaimStatus::AlreadyClaimed => write!(f, "already claimed"),
            ClaimStatus::Failed => write!(f, "failed"),
        }
    }
}

// ──────────────────────────────────────────────
// ClaimResult
// ──────────────────────────────────────────────

/// The normalized outcome of one account's claim run.
///
/// Every display field defaults to [`UNKNOWN`]; a `Failed` row keeps all of
/// them there. `uid` holds the masked form only, the raw id is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimResult {
    pub label: String,
    pub uid: String,
    pub nickname: String,
    pub level: String,
    pub server: String,
    pub day: String,
    pub status: ClaimStatus,
    pub reward: String,
}

impl ClaimResult {
    /// A `Failed` row for the given label, every other field unknown.
    pub fn failed(label: &str) -> Self {
        ClaimResult {
            label: label.to_string(),
            uid: UNKNOWN.to_string(),
            nickname: UNKNOWN.to_string(),
            level: UNKNOWN.to_string(),
            server: UNKNOWN.to_string(),
            day: UNKNOWN.to_string(),
            status: ClaimStatus::Failed,
            reward: UNKNOWN.to_string(),
        }
    }
}

// ──────────────────────────────────────────────
// Masking
// ──────────────────────────────────────────────

/// Mask an account id for display.
///
/// Keeps the first two and last one characters around the fixed-width
/// [`MASK`], so the masked form does not reveal the id's length. Ids shorter
/// than three characters are replaced by the marker entirely, since keeping
/// three characters would reveal most of the id.
pub fn mask_uid(uid: &str) -> String {
    let chars: Vec<char> = uid.chars().collect();
    if chars.len() < 3 {
        return MASK.to_string();
    }
    let head: String = chars[..2].iter().collect();
    format!("{}{}{}", head, MASK, chars[chars.len() - 1])
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_interior_keeping_first_two_and_last_one() {
        assert_eq!(mask_uid("812345679"), format!("81{}9", MASK));
    }

    #[test]
    fn mask_width_is_independent_of_input_length() {
        let short = mask_uid("123");
        let long = mask_uid("1234567890123");
        assert_eq!(short.chars().count(), long.chars().count());
    }

    #[test]
    fn minimum_length_input_keeps_boundary_characters() {
        assert_eq!(mask_uid("abc"), format!("ab{}c", MASK));
    }

    #[test]
    fn short_ids_are_fully_redacted() {
        assert_eq!(mask_uid(""), MASK);
        assert_eq!(mask_uid("a"), MASK);
        assert_eq!(mask_uid("ab"), MASK);
    }

    #[test]
    fn failed_row_keeps_unknown_markers() {
        let row = ClaimResult::failed("ACCOUNT_C");
        assert_eq!(row.status, ClaimStatus::Failed);
        for field in [&row.uid, &row.nickname, &row.level, &row.server, &row.day, &row.reward] {
            assert_eq!(field, UNKNOWN);
        }
    }

    #[test]
    fn status_display_strings() {
        assert_eq!(ClaimStatus::Claimed.to_string(), "claimed");
        assert_eq!(ClaimStatus::AlreadyClaimed.to_string(), "already claimed");
        assert_eq!(ClaimStatus::Failed.to_string(), "failed");
    }
}
