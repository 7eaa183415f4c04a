//! Credential records and their collection from the environment.
//!
//! One record per configured account: the environment variable name acts as
//! the stable label, the value is an `ltuid,ltoken` cookie pair. Records are
//! sorted by label so reports are reproducible across runs.

use std::fmt;

/// Environment variable prefix that marks a credential entry.
pub const CREDENTIAL_PREFIX: &str = "ACCOUNT";

/// One account's session credentials.
///
/// `ltuid` and `ltoken` are opaque HoYoLAB session cookie values. They are
/// redacted from `Debug` output so a stray `{:?}` can never leak them.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub label: String,
    pub ltuid: String,
    pub ltoken: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("label", &self.label)
            .field("ltuid", &"<redacted>")
            .field("ltoken", &"<redacted>")
            .finish()
    }
}

/// Collect credential records from an iterator of (name, value) pairs.
///
/// A pair is a credential entry when the name starts with
/// [`CREDENTIAL_PREFIX`] and the value contains a comma. The value splits on
/// the first comma into `ltuid` and `ltoken`, both trimmed. The returned
/// records are sorted by label.
pub fn collect_credentials<I>(vars: I) -> Vec<CredentialRecord>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut records: Vec<CredentialRecord> = vars
        .into_iter()
        .filter(|(name, _)| name.starts_with(CREDENTIAL_PREFIX))
        .filter_map(|(name, value)| {
            let (ltuid, ltoken) = value.split_once(',')?;
            Some(CredentialRecord {
                label: name,
                ltuid: ltuid.trim().to_string(),
                ltoken: ltoken.trim().to_string(),
            })
        })
        .collect();
    records.sort_by(|a, b| a.label.cmp(&b.label));
    records
}

/// Collect credential records from the process environment.
pub fn credentials_from_env() -> Vec<CredentialRecord> {
    collect_credentials(std::env::vars())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
