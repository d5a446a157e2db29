//! Output writer.
//!
//! Materializes a [`Site`] on disk. The target directory is cleared of its
//! non-hidden top-level entries first, so the output mirrors the site
//! exactly. Static files are written only when their extension is a known
//! web asset type.

use std::fs;
use std::path::{Path, PathBuf};

use crate::node::Node;
use crate::site::Site;

/// Static file extensions copied to the output (compared case-insensitively).
pub const PUBLISHABLE_EXTENSIONS: &[&str] = &[
    "css", "js", "mjs", "map", "html", "htm", "png", "jpg", "jpeg", "gif", "svg", "webp", "avif",
    "ico", "woff", "woff2", "ttf", "otf", "txt", "xml", "json", "pdf", "mp4", "webm", "mp3",
];

/// Counts reported after writing a site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub pages: usize,
    pub static_files: usize,
    pub directories: usize,
    /// Static files left out because of their extension.
    pub skipped: usize,
}

/// Error returned when the output cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to clear {}: {source}", .path.display())]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a static file with this name is copied to the output.
pub fn is_publishable_asset(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PUBLISHABLE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Write `site` under `target`, creating it if needed.
///
/// # Errors
///
/// Returns the first filesystem error with the failing path attached.
pub fn write_site(site: &Site, target: &Path) -> Result<WriteSummary, WriteError> {
    fs::create_dir_all(target).map_err(|source| WriteError::CreateDir {
        path: target.to_path_buf(),
        source,
    })?;
    clear_target(target)?;

    let mut summary = WriteSummary::default();
    write_nodes(&site.nodes, target, &mut summary)?;

    tracing::info!(
        path = %target.display(),
        pages = summary.pages,
        static_files = summary.static_files,
        skipped = summary.skipped,
        "Wrote site"
    );

    Ok(summary)
}

fn clear_target(target: &Path) -> Result<(), WriteError> {
    let clear_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| WriteError::Clear { path, source }
    };

    for entry in fs::read_dir(target).map_err(clear_error(target))? {
        let entry = entry.map_err(clear_error(target))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type().map_err(clear_error(&path))?;
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(clear_error(&path))?;
    }

    Ok(())
}

fn write_nodes(nodes: &[Node], target: &Path, summary: &mut WriteSummary) -> Result<(), WriteError> {
    for node in nodes {
        let path = target.join(node.name());
        match node {
            Node::Directory { children, .. } => {
                if writes_output(node) {
                    fs::create_dir_all(&path).map_err(|source| WriteError::CreateDir {
                        path: path.clone(),
                        source,
                    })?;
                    summary.directories += 1;
                }
                write_nodes(children, target, summary)?;
            }
            Node::Page { content, .. } => {
                write_file(&path, content)?;
                summary.pages += 1;
            }
            Node::Static { name, content } => {
                if is_publishable_asset(name) {
                    write_file(&path, content)?;
                    summary.static_files += 1;
                } else {
                    tracing::debug!(path = name, "Skipping unpublished static file");
                    summary.skipped += 1;
                }
            }
        }
    }
    Ok(())
}

/// Whether writing `node` puts at least one file on disk.
fn writes_output(node: &Node) -> bool {
    match node {
        Node::Page { .. } => true,
        Node::Static { name, .. } => is_publishable_asset(name),
        Node::Directory { children, .. } => children.iter().any(writes_output),
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), WriteError> {
    fs::write(path, content).map_err(|source| WriteError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
