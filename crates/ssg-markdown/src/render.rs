//! Sanitized HTML rendering.
//!
//! Raw HTML in the source is never passed through: it is emitted as escaped
//! text. Link and image destinations using a scheme other than `http`,
//! `https` or `mailto` are replaced with `#`.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};

/// URL schemes allowed in link and image destinations.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render a markdown body to sanitized HTML.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(sanitize_event);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        // Text events are escaped by the HTML writer.
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    match scheme(&url) {
        Some(scheme)
            if !ALLOWED_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed)) =>
        {
            CowStr::Borrowed("#")
        }
        _ => url,
    }
}

/// Extract the URL scheme, if the URL has one.
///
/// A scheme is a leading run of ASCII alphanumerics, `+`, `-` or `.`
/// starting with a letter and terminated by `:` before any `/`, `?` or `#`.
fn scheme(url: &str) -> Option<&str> {
    let url = url.trim_start();
    let end = url.find([':', '/', '?', '#'])?;
    if url.as_bytes()[end] != b':' {
        return None;
    }

    let candidate = &url[..end];
    let mut chars = candidate.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid.then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_paragraph() {
        assert_eq!(render_html("Hello **World**"), "<p>Hello <strong>World</strong></p>\n");
    }

    #[test]
    fn test_render_table() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_inline_html_is_escaped() {
        let html = render_html("click <script>alert(1)</script> here");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_block_html_is_escaped() {
        let html = render_html("<div onclick=\"evil()\">x</div>\n");
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;div"));
    }

    #[test]
    fn test_javascript_link_is_neutralized() {
        let html = render_html("[x](javascript:alert(1))");
        assert_eq!(html, "<p><a href=\"#\">x</a></p>\n");
    }

    #[test]
    fn test_safe_links_are_kept() {
        assert!(render_html("[x](https://example.com)").contains("href=\"https://example.com\""));
        assert!(render_html("[x](mailto:a@b.c)").contains("href=\"mailto:a@b.c\""));
        assert!(render_html("[x](/content/a.html)").contains("href=\"/content/a.html\""));
        assert!(render_html("[x](a.html#top)").contains("href=\"a.html#top\""));
    }

    #[test]
    fn test_data_image_is_neutralized() {
        let html = render_html("![alt](data:image/svg+xml;base64,AAAA)");
        assert!(html.contains("src=\"#\""));
    }

    #[test]
    fn test_scheme_detection() {
        assert_eq!(scheme("https://x"), Some("https"));
        assert_eq!(scheme("JavaScript:void(0)"), Some("JavaScript"));
        assert_eq!(scheme("/path:with/colon"), None);
        assert_eq!(scheme("page.html?q=a:b"), None);
        assert_eq!(scheme("relative/page.html"), None);
        assert_eq!(scheme("1abc:x"), None);
    }
}
