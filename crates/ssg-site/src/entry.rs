//! Source tree loading.
//!
//! Reads a site directory into an immutable tree of [`Entry`] values. Entry
//! names are paths relative to the site root, separated by `/`, e.g.
//! `content/post.md`.

use std::fs;
use std::path::{Path, PathBuf};

/// One filesystem object from the source tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Regular file with its full contents.
    File {
        /// Path relative to the site root.
        name: String,
        /// Raw file bytes.
        content: Vec<u8>,
    },
    /// Directory with its children in name order.
    Directory {
        /// Path relative to the site root.
        name: String,
        /// Child entries.
        children: Vec<Entry>,
    },
}

impl Entry {
    /// Create a file entry.
    pub fn file(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::File {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<String>, children: Vec<Entry>) -> Self {
        Self::Directory {
            name: name.into(),
            children,
        }
    }

    /// Path relative to the site root.
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    /// Last path segment of the name.
    pub fn base_name(&self) -> &str {
        base_name(self.name())
    }

    /// File contents, `None` for directories.
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            Self::File { content, .. } => Some(content),
            Self::Directory { .. } => None,
        }
    }

    /// Directory children, empty for files.
    pub fn children(&self) -> &[Entry] {
        match self {
            Self::File { .. } => &[],
            Self::Directory { children, .. } => children,
        }
    }

    /// Hidden entries (base name starting with `.`) never reach the output.
    pub fn is_hidden(&self) -> bool {
        self.base_name().starts_with('.')
    }
}

/// Last `/`-separated segment of a site-relative name.
pub(crate) fn base_name(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(_, base)| base)
}

/// Remove the entry named `name` from the tree, at any depth.
///
/// Returns `true` if an entry was removed.
pub fn remove_entry(entries: &mut Vec<Entry>, name: &str) -> bool {
    if let Some(pos) = entries.iter().position(|entry| entry.name() == name) {
        entries.remove(pos);
        return true;
    }

    entries.iter_mut().any(|entry| match entry {
        Entry::Directory {
            name: dir,
            children,
        } if name.starts_with(dir.as_str()) && name[dir.len()..].starts_with('/') => {
            remove_entry(children, name)
        }
        _ => false,
    })
}

/// Error returned when the source tree cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Directory could not be listed.
    #[error("failed to open directory {}: {source}", .path.display())]
    ReadDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// File could not be read.
    #[error("failed to read file {}: {source}", .path.display())]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Load the entry tree rooted at `root`.
///
/// The root itself is not represented; its children are returned in name
/// order. Symlinks are followed. Objects that are neither files nor
/// directories are skipped.
///
/// # Errors
///
/// Fails on the first directory that cannot be listed or file that cannot
/// be read. No partial tree is returned.
pub fn load_entries(root: &Path) -> Result<Vec<Entry>, LoadError> {
    load_dir(root, "")
}

fn load_dir(dir: &Path, prefix: &str) -> Result<Vec<Entry>, LoadError> {
    let read_dir_error = |source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut listing = fs::read_dir(dir)
        .map_err(read_dir_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_error)?;
    listing.sort_by_key(fs::DirEntry::file_name);

    let mut entries = Vec::with_capacity(listing.len());
    for dir_entry in listing {
        let path = dir_entry.path();
        let file_name = dir_entry.file_name();
        let file_name = file_name.to_string_lossy();
        let name = if prefix.is_empty() {
            file_name.into_owned()
        } else {
            format!("{prefix}/{file_name}")
        };

        // fs::metadata follows symlinks
        let metadata = fs::metadata(&path).map_err(|source| LoadError::ReadFile {
            path: path.clone(),
            source,
        })?;

        if metadata.is_dir() {
            let children = load_dir(&path, &name)?;
            entries.push(Entry::Directory { name, children });
        } else if metadata.is_file() {
            let content = fs::read(&path).map_err(|source| LoadError::ReadFile {
                path: path.clone(),
                source,
            })?;
            entries.push(Entry::File { name, content });
        } else {
            tracing::debug!(path = %path.display(), "Skipping special file");
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_nested_tree() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "outer.md", "outer");
        write(temp.path(), "content/inner.md", "inner");

        let entries = load_entries(temp.path()).unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::directory("content", vec![Entry::file("content/inner.md", "inner")]),
                Entry::file("outer.md", "outer"),
            ]
        );
    }

    #[test]
    fn test_names_have_no_root_prefix() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a/b/c.txt", "x");

        let entries = load_entries(temp.path()).unwrap();
        let inner = &entries[0].children()[0].children()[0];

        assert_eq!(inner.name(), "a/b/c.txt");
        assert_eq!(inner.base_name(), "c.txt");
        assert_eq!(inner.content(), Some(&b"x"[..]));
    }

    #[test]
    fn test_listing_is_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta.css", "alpha.md", "mid.txt"] {
            write(temp.path(), name, "");
        }

        let names: Vec<_> = load_entries(temp.path())
            .unwrap()
            .iter()
            .map(|e| e.name().to_owned())
            .collect();

        assert_eq!(names, vec!["alpha.md", "mid.txt", "zeta.css"]);
    }

    #[test]
    fn test_empty_directory_is_kept() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("empty")).unwrap();

        let entries = load_entries(temp.path()).unwrap();

        assert_eq!(entries, vec![Entry::directory("empty", Vec::new())]);
    }

    #[test]
    fn test_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = load_entries(&missing).unwrap_err();

        assert!(matches!(err, LoadError::ReadDir { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_remove_nested_entry() {
        let mut entries = vec![
            Entry::directory(
                "public",
                vec![
                    Entry::directory("public/out", vec![Entry::file("public/out/index.html", "")]),
                    Entry::file("public/logo.svg", ""),
                ],
            ),
            Entry::file("publicity.md", ""),
        ];

        assert!(remove_entry(&mut entries, "public/out"));
        assert!(!remove_entry(&mut entries, "public/out"));
        assert!(!remove_entry(&mut entries, "publicity.md/x"));

        assert_eq!(
            entries,
            vec![
                Entry::directory("public", vec![Entry::file("public/logo.svg", "")]),
                Entry::file("publicity.md", ""),
            ]
        );
    }

    #[test]
    fn test_hidden_detection_uses_base_name() {
        assert!(Entry::file(".env", "").is_hidden());
        assert!(Entry::file("content/.draft.md", "").is_hidden());
        assert!(!Entry::file("content/post.md", "").is_hidden());
        assert!(!Entry::directory("a.b", Vec::new()).is_hidden());
    }
}
