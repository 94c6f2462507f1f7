/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Guard serialized JSON embedded inside a `<script>` block: a literal
/// `</script>` in string content would terminate the block early.
pub fn escape_script_embed(s: &str) -> String {
    s.replace("</script>", "<\\/script>")
}
