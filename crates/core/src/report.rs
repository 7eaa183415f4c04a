//! Plain-text report table.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::claim::ClaimResult;

const HEADERS: [&str; 7] = ["UID", "Nickname", "Level", "Server", "Day", "Status", "Reward"];

/// Gap between columns.
const GUTTER: &str = "  ";

/// Render the batch outcome as a titled table.
///
/// The title is the local timestamp of the run (UTC when the local offset
/// is unavailable). Column widths are computed from content, so the table
/// stays aligned for any nickname or reward length.
pub fn render_table(results: &[ClaimResult]) -> String {
    render(results, &title_timestamp())
}

fn render(results: &[ClaimResult], title: &str) -> String {
    let rows: Vec<[&str; 7]> = results
        .iter()
        .map(|r| {
            [
                r.uid.as_str(),
                r.nickname.as_str(),
                r.level.as_str(),
                r.server.as_str(),
                r.day.as_str(),
                match r.status {
                    crate::claim::ClaimStatus::Claimed => "claimed",
                    crate::claim::ClaimStatus::AlreadyClaimed => "already claimed",
                    crate::claim::ClaimStatus::Failed => "failed",
                },
                r.reward.as_str(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push('\n');
    out.push_str(&format_row(&HEADERS, &widths));
    out.push('\n');

    let rule_width = widths.iter().sum::<usize>() + GUTTER.len() * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out
}

fn format_row(cells: &[&str; 7], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            line.push_str(GUTTER);
        }
        line.push_str(cell);
        // Pad by character count, not byte length, so the mask glyphs align
        for _ in cell.chars().count()..*width {
            line.push(' ');
        }
    }
    // Trailing spaces on the last column serve no purpose
    let trimmed = line.trim_end().len();
    line.truncate(trimmed);
    line
}

fn title_timestamp() -> String {
    let format =
        format_description!("[year]-[month]-[day] [hour repr:12]:[minute]:[second] [period]");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&format).unwrap_or_else(|_| "unknown".to_string())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
