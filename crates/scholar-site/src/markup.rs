//! Escaping for values interpolated into HTML and XML.

use std::borrow::Cow;

/// Escape `& < > "` so a value is inert inside element text and
/// double-quoted attributes. Works for XML text nodes as well.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Make serialized JSON safe to embed in a `<script>` element.
pub fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed_unchanged() {
        assert!(matches!(escape("Paper One"), Cow::Borrowed("Paper One")));
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(
            escape(r#"<script>alert("x")</script> & co"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; co"
        );
    }

    #[test]
    fn apostrophes_pass_through() {
        assert_eq!(escape("Don't panic"), "Don't panic");
    }

    #[test]
    fn script_close_tags_are_neutralised() {
        assert_eq!(
            script_safe_json(r#"{"a":"</script><b>"}"#),
            r#"{"a":"<\/script><b>"}"#
        );
    }
}
