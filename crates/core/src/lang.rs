//! Language tag validation.

use crate::diag::DiagnosticSink;

/// Language tags accepted by the check-in endpoints.
pub const SUPPORTED_LANGS: [&str; 13] = [
    "zh-cn", "zh-tw", "de-de", "en-us", "es-es", "fr-fr", "id-id", "ja-jp", "ko-kr", "pt-pt",
    "ru-ru", "th-th", "vi-vn",
];

/// Fallback when the configured tag is not supported.
pub const DEFAULT_LANG: &str = "en-us";

/// Validate a language tag against [`SUPPORTED_LANGS`].
///
/// The tag is lowercased first, so `EN-US` normalizes silently. An
/// unsupported tag falls back to [`DEFAULT_LANG`] with exactly one
/// diagnostic naming the rejected value.
pub fn normalize_lang(tag: &str, sink: &dyn DiagnosticSink) -> String {
    let lowered = tag.to_ascii_lowercase();
    if SUPPORTED_LANGS.contains(&lowered.as_str()) {
        return lowered;
    }
    sink.log(&format!(
        "'{}' is not a supported language tag (expected one of {}), using '{}'",
        tag,
        SUPPORTED_LANGS.join(", "),
        DEFAULT_LANG
    ));
    DEFAULT_LANG.to_string()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
