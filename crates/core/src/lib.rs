//! checkin-core: daily check-in claim engine.
//!
//! Maps a set of credential records to a set of claim outcomes: each record
//! is resolved independently against the remote reward API, failures degrade
//! the affected account's row and never its siblings, and the batch comes
//! back in a deterministic order for reporting.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`claim_all()`] -- fan out one claim task per credential record
//! - [`resolve()`] -- claim + metadata lookup for a single record
//! - [`RewardClient`] -- the remote API seam ([`HoyolabClient`] live,
//!   [`StaticRewardClient`] scripted)
//! - [`ClaimResult`] / [`ClaimStatus`] -- the normalized per-account outcome
//! - [`DiagnosticSink`] -- injected diagnostics capability

pub mod batch;
pub mod claim;
pub mod client;
pub mod credential;
pub mod diag;
pub mod hoyolab;
pub mod lang;
pub mod notify;
pub mod report;
pub mod resolver;

// ── Convenience re-exports: key types ────────────────────────────────

pub use batch::{claim_all, BatchOptions};
pub use claim::{mask_uid, ClaimResult, ClaimStatus, MASK, UNKNOWN};
pub use client::{
    ClaimOutcome, ClientError, GameAccount, RewardClient, RewardCycle, RewardItem,
    StaticAccountState, StaticRewardClient, GAME_TITLE,
};
pub use credential::{collect_credentials, credentials_from_env, CredentialRecord};
pub use diag::{ConsoleSink, DiagnosticSink, MemorySink};
pub use hoyolab::HoyolabClient;
pub use lang::{normalize_lang, DEFAULT_LANG, SUPPORTED_LANGS};
pub use notify::Notifier;
pub use report::render_table;
pub use resolver::resolve;
