/// Escapes the five HTML-significant characters.
///
/// `&` is replaced first so the ampersands introduced by the other replacements are never
/// escaped twice.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
