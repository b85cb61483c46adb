//! HTML escaping for text interpolated into markup.

/// Escape the five HTML-reserved characters in a single pass.
///
/// Every piece of user- or server-supplied text must go through this before
/// it is placed inside a markup string.
///
/// # Example
///
/// ```rust
/// use chirec_ui::ui::escape_html;
///
/// assert_eq!(escape_html("<b>X</b>"), "&lt;b&gt;X&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
