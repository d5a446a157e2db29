//! Output document tree.

use ssg_markdown::Metadata;

use crate::entry::base_name;

/// File name of directory and site landing pages.
pub const INDEX_FILENAME: &str = "index.html";

/// Kind of a [`Node`], for callers that only need to branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    HtmlPage,
    StaticFile,
    Directory,
}

/// An element of the built document tree.
///
/// Names are output paths relative to the site root (`content/post.html`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// HTML page converted from markdown or synthesized by the builder.
    Page {
        name: String,
        content: Vec<u8>,
        /// Frontmatter, present only for pages converted from markdown.
        metadata: Option<Metadata>,
    },
    /// Any other file, copied through unchanged.
    Static { name: String, content: Vec<u8> },
    /// Directory with at least one child.
    Directory { name: String, children: Vec<Node> },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Self::Page { name, .. } | Self::Static { name, .. } | Self::Directory { name, .. } => {
                name
            }
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Page { .. } => NodeKind::HtmlPage,
            Self::Static { .. } => NodeKind::StaticFile,
            Self::Directory { .. } => NodeKind::Directory,
        }
    }

    /// Byte payload, `None` for directories.
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            Self::Page { content, .. } | Self::Static { content, .. } => Some(content),
            Self::Directory { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Directory { children, .. } => children,
            Self::Page { .. } | Self::Static { .. } => &[],
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Self::Page { metadata, .. } => metadata.as_ref(),
            Self::Static { .. } | Self::Directory { .. } => None,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// True if this is a file named `index.html` at any depth.
    pub fn is_index(&self) -> bool {
        !self.is_directory() && base_name(self.name()) == INDEX_FILENAME
    }

    /// The `index.html` child of a directory.
    pub fn index_child(&self) -> Option<&Node> {
        self.children().iter().find(|child| child.is_index())
    }

    /// Depth-first search for a node by its full name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name() == name {
            return Some(self);
        }
        find_in(self.children(), name)
    }
}

/// Depth-first search over a node list.
pub(crate) fn find_in<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| node.find(name))
}
