//! Markdown conversion for ssg.
//!
//! Turns a raw markdown file into its frontmatter metadata and a sanitized
//! HTML body:
//!
//! ```text
//! +++
//! title = Hello
//! date = 2025-01-06
//! +++
//!
//! Body **markdown**.
//! ```
//!
//! # Example
//!
//! ```
//! let doc = ssg_markdown::to_html(b"+++\ntitle = Hello\n+++\n# Hi").unwrap();
//! assert_eq!(doc.metadata.get("title").map(String::as_str), Some("Hello"));
//! assert!(doc.html.contains("<h1>Hi</h1>"));
//! ```

mod frontmatter;
mod render;

use std::collections::BTreeMap;

pub use frontmatter::split_frontmatter;
pub use render::render_html;

/// Frontmatter key/value pairs.
pub type Metadata = BTreeMap<String, String>;

/// A converted markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlDoc {
    /// Frontmatter metadata (empty when the file has no frontmatter block).
    pub metadata: Metadata,
    /// Sanitized HTML rendered from the markdown body.
    pub html: String,
}

/// Error returned when a markdown file cannot be converted.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    /// Source is not valid UTF-8.
    #[error("markdown is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// A frontmatter line is not a `key = value` pair.
    #[error("failed to parse metadata: not a valid key value pair {line:?}, expected key = value")]
    InvalidFrontmatter {
        /// The offending line, untrimmed.
        line: String,
    },
}

/// Convert raw markdown bytes into metadata and sanitized HTML.
///
/// # Errors
///
/// Returns an error if the input is not UTF-8 or its frontmatter block
/// contains a malformed line.
pub fn to_html(raw: &[u8]) -> Result<HtmlDoc, MarkdownError> {
    let text = std::str::from_utf8(raw)?;
    let (metadata, body) = split_frontmatter(text)?;

    Ok(HtmlDoc {
        metadata,
        html: render_html(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_html_with_frontmatter() {
        let doc = to_html(
            b"\n+++\nauthor = Jane Doe\ntitle = Test markdown\n+++\n\nHello, World\n",
        )
        .unwrap();

        assert_eq!(doc.metadata.get("author").unwrap(), "Jane Doe");
        assert_eq!(doc.metadata.get("title").unwrap(), "Test markdown");
        assert_eq!(doc.html, "<p>Hello, World</p>\n");
    }

    #[test]
    fn test_to_html_without_frontmatter_keeps_body() {
        let doc = to_html(b"# Title\n\ntext").unwrap();

        assert!(doc.metadata.is_empty());
        assert_eq!(doc.html, "<h1>Title</h1>\n<p>text</p>\n");
    }

    #[test]
    fn test_to_html_invalid_utf8() {
        let err = to_html(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, MarkdownError::Encoding(_)));
    }

    #[test]
    fn test_to_html_invalid_frontmatter_line() {
        let err = to_html(b"+++\nnot a pair\n+++\nbody").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse metadata: not a valid key value pair \"not a pair\", expected key = value"
        );
    }
}
