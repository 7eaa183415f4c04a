//! One batch run: environment to report.

use std::sync::Arc;
use std::time::Duration;

use checkin_core::{
    claim_all, credentials_from_env, normalize_lang, render_table, BatchOptions, DiagnosticSink,
    HoyolabClient, Notifier, RewardClient, DEFAULT_LANG,
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Collect configured accounts, claim for all of them, render the table,
/// and optionally forward each summary to the configured chat.
pub(crate) async fn run_once(notify: bool, quiet: bool, sink: &Arc<dyn DiagnosticSink>) {
    // Step 1: configuration from the environment
    let creds = credentials_from_env();
    let lang_raw = std::env::var("SERVER").unwrap_or_else(|_| DEFAULT_LANG.to_string());
    let lang = normalize_lang(&lang_raw, sink.as_ref());
    let options = BatchOptions {
        per_account_timeout: timeout_from_env(sink.as_ref()),
    };

    // Step 2: claim for every account concurrently
    let client: Arc<dyn RewardClient> = Arc::new(HoyolabClient::new(&lang));
    let results = claim_all(client, &creds, &options, Arc::clone(sink)).await;

    // Step 3: render the report
    if !quiet {
        println!("{}", render_table(&results));
    }

    // Step 4: forward summaries
    if notify {
        match Notifier::from_env() {
            Some(notifier) => {
                for result in &results {
                    if let Err(e) = notifier.send(&Notifier::summary(result)).await {
                        sink.log(&format!("{}: notification failed: {}", result.label, e));
                    }
                }
            }
            None => sink.log("notifications enabled but BOT_TOKEN or CHAT_ID is not set"),
        }
    }
}

/// Per-account timeout from `TIMEOUT` (seconds); invalid values fall back
/// to the default with a diagnostic.
fn timeout_from_env(sink: &dyn DiagnosticSink) -> Duration {
    match std::env::var("TIMEOUT") {
        Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                sink.log(&format!(
                    "'{}' is not a valid TIMEOUT in seconds, using {}",
                    raw, DEFAULT_TIMEOUT_SECS
                ));
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
