// ============================================================================
// Textual markers carried inside assertion names and messages
// ============================================================================

/// Substring that classifies an assertion (and its case) as skipped.
pub const SKIP_MARKER: &str = "skip";

/// Marker sequence test authors embed in assertion text to request a visual
/// soft-failure highlight without failing the case.
pub const SOFT_FAILURE_MARKER: &str = "+ -->";

/// Whether assertion text requests skip classification (case-insensitive).
pub fn is_skip_text(text: &str) -> bool {
    text.to_lowercase().contains(SKIP_MARKER)
}

/// Whether assertion text carries the soft-failure marker, in literal or
/// HTML-entity-escaped form. Text is unescaped once before the single
/// canonical substring check, so both variants hit the same predicate.
pub fn has_soft_failure_marker(text: &str) -> bool {
    html_unescape(text)
        .to_lowercase()
        .contains(&SOFT_FAILURE_MARKER.to_lowercase())
}

/// Reverse one level of HTML entity escaping. `&amp;` is handled last so a
/// double-escaped sequence unescapes exactly one level.
pub fn html_unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
