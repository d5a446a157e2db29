//! `+++` delimited frontmatter.

use crate::{MarkdownError, Metadata};

const DELIMITER: &str = "+++";

/// Split a markdown document into its frontmatter metadata and body.
///
/// The block opens at the first line that trims to `+++`, provided every
/// line before it is blank, and closes at the next line that trims to `+++`.
/// Inside the block, blank lines are skipped and every other line is split
/// at its first `=` into a trimmed key and value.
///
/// Without a complete block the metadata is empty and the whole input is
/// returned as the body.
pub fn split_frontmatter(text: &str) -> Result<(Metadata, &str), MarkdownError> {
    let Some((block, body)) = locate_block(text) else {
        return Ok((Metadata::new(), text));
    };

    let mut metadata = Metadata::new();
    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(invalid_line(line));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid_line(line));
        }

        metadata.insert(key.to_owned(), value.trim().to_owned());
    }

    Ok((metadata, body))
}

fn invalid_line(line: &str) -> MarkdownError {
    MarkdownError::InvalidFrontmatter {
        line: line.to_owned(),
    }
}

/// Find the frontmatter block, returning `(block contents, remaining body)`.
fn locate_block(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    let mut block_start = None;

    for line in text.split_inclusive('\n') {
        let next = offset + line.len();
        let is_delimiter = line.trim() == DELIMITER;

        match block_start {
            None if is_delimiter => block_start = Some(next),
            None if !line.trim().is_empty() => return None,
            Some(start) if is_delimiter => return Some((&text[start..offset], &text[next..])),
            _ => {}
        }

        offset = next;
    }

    None
}
