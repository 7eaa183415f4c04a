//! Daily run-time parsing and next-occurrence arithmetic.

use std::time::Duration;

use time::macros::format_description;
use time::{OffsetDateTime, Time};

/// Parse a daily run time in `HH:MM` or `HH:MM:SS` form.
///
/// Hours are 24-hour and zero-padded; out-of-range components are rejected
/// by the `time` parser.
pub fn parse_run_time(raw: &str) -> Result<Time, time::error::Parse> {
    let hms = format_description!("[hour]:[minute]:[second]");
    let hm = format_description!("[hour]:[minute]");
    Time::parse(raw, &hms).or_else(|_| Time::parse(raw, &hm))
}

/// How long to sleep from `now` until the next occurrence of `target`.
///
/// A target at or before the current time of day schedules for tomorrow.
/// Never returns zero, so the schedule loop cannot spin.
pub fn until_next(target: Time, now: OffsetDateTime) -> Duration {
    let today = now.replace_time(target);
    let next = if today > now {
        today
    } else {
        today + time::Duration::days(1)
    };
    let seconds = (next - now).whole_seconds().max(1) as u64;
    Duration::from_secs(seconds)
}

/// Current wall-clock time in the local offset, UTC when unavailable.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
