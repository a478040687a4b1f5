//! Display-safety escaping.
//!
//! Everything user-controlled is entity-escaped before it lands in
//! rendered markup. Watch-provider links come from the metadata
//! collaborator but are still user-influenced, so their scheme is
//! pinned to http/https and anchors never leak a referrer or opener.

use url::Url;

/// HTML-entity-escape text for embedding in rendered markup.
pub fn escape_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a "where to watch" link. Only http/https URLs become anchors;
/// any other scheme degrades to the escaped label as plain text.
pub fn render_watch_link(label: &str, href: &str) -> String {
    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => format!(
            "<a href=\"{}\" rel=\"noopener noreferrer\" target=\"_blank\">{}</a>",
            escape_for_display(href),
            escape_for_display(label),
        ),
        _ => escape_for_display(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_significant_characters() {
        assert_eq!(
            escape_for_display("<script>alert(\"x\")</script>"),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(escape_for_display("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape_for_display("It's fine"), "It&#x27;s fine");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_for_display("The Dark Knight"), "The Dark Knight");
    }

    #[test]
    fn https_links_render_with_safe_attributes() {
        let html = render_watch_link("Netflix", "https://www.netflix.com/title/1");
        assert!(html.starts_with("<a href=\"https:&#x2F;&#x2F;www.netflix.com&#x2F;title&#x2F;1\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.ends_with(">Netflix</a>"));
    }

    #[test]
    fn non_http_schemes_degrade_to_plain_text() {
        assert_eq!(
            render_watch_link("click me", "javascript:alert(1)"),
            "click me"
        );
        assert_eq!(
            render_watch_link("click me", "data:text/html;base64,xx"),
            "click me"
        );
        assert_eq!(render_watch_link("broken", "not a url"), "broken");
    }

    #[test]
    fn hostile_labels_are_escaped_either_way() {
        let html = render_watch_link("<b>bold</b>", "https://example.com/");
        assert!(!html.contains("<b>"));
        assert_eq!(
            render_watch_link("<b>bold</b>", "ftp://example.com/"),
            "&lt;b&gt;bold&lt;&#x2F;b&gt;"
        );
    }
}
