//! Entry tree to document tree conversion.

use ssg_markdown::Metadata;

use crate::config::SiteConfig;
use crate::entry::Entry;
use crate::error::{BuildError, InvalidDraft};
use crate::node::{INDEX_FILENAME, Node};
use crate::templates::{IndexData, IndexEntry, PageData, Templates};

/// Top-level directory whose children are listed on the synthesized index.
pub const CONTENT_DIR: &str = "content";

const MARKDOWN_EXT: &str = ".md";
const HOME_PAGE_SOURCE: &str = "index.md";

/// Read the `draft` flag from page metadata.
///
/// Absent means published.
///
/// # Errors
///
/// Returns [`InvalidDraft`] for any value other than `true` or `false`.
pub fn is_draft(metadata: &Metadata) -> Result<bool, InvalidDraft> {
    match metadata.get("draft").map(String::as_str) {
        None | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(other) => Err(InvalidDraft(other.to_owned())),
    }
}

/// Builds document trees for one resolved configuration.
#[derive(Debug)]
pub struct SiteBuilder {
    config: SiteConfig,
    templates: Templates,
}

impl SiteBuilder {
    /// Create a builder using the embedded templates.
    pub fn new(config: SiteConfig) -> Self {
        Self::with_templates(config, Templates::embedded())
    }

    pub fn with_templates(config: SiteConfig, templates: Templates) -> Self {
        Self { config, templates }
    }

    pub fn into_config(self) -> SiteConfig {
        self.config
    }

    /// Build the top-level node list from the top-level entries.
    ///
    /// Hidden entries and unpublished drafts are skipped, directories left
    /// empty are dropped, and markdown pages are rendered through the page
    /// template. A top-level `index.md` becomes a plain conversion. Without
    /// a top-level `index.html`, an index of `content/` is appended when
    /// that directory exists.
    ///
    /// # Errors
    ///
    /// Returns the first markdown, draft, title or template error, naming
    /// the offending entry.
    pub fn build(&self, entries: &[Entry]) -> Result<Vec<Node>, BuildError> {
        let mut nodes = self.build_nodes(entries, true)?;

        if !nodes.iter().any(Node::is_index)
            && let Some(content) = nodes
                .iter()
                .find(|node| node.is_directory() && node.name() == CONTENT_DIR)
        {
            let index = self.build_index(content)?;
            nodes.push(index);
        }

        Ok(nodes)
    }

    fn build_nodes(&self, entries: &[Entry], top_level: bool) -> Result<Vec<Node>, BuildError> {
        let mut nodes = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(node) = self.build_node(entry, top_level)? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    fn build_node(&self, entry: &Entry, top_level: bool) -> Result<Option<Node>, BuildError> {
        if entry.is_hidden() {
            return Ok(None);
        }

        match entry {
            Entry::Directory { name, children } => {
                let children = self.build_nodes(children, false)?;
                Ok((!children.is_empty()).then(|| Node::Directory {
                    name: name.clone(),
                    children,
                }))
            }
            Entry::File { name, content } => match name.strip_suffix(MARKDOWN_EXT) {
                Some(stem) => self.build_page(name, stem, content, top_level),
                None => Ok(Some(Node::Static {
                    name: name.clone(),
                    content: content.clone(),
                })),
            },
        }
    }

    fn build_page(
        &self,
        name: &str,
        stem: &str,
        content: &[u8],
        top_level: bool,
    ) -> Result<Option<Node>, BuildError> {
        let doc = ssg_markdown::to_html(content).map_err(|source| BuildError::Markdown {
            path: name.to_owned(),
            source,
        })?;

        let draft = is_draft(&doc.metadata).map_err(|source| BuildError::Draft {
            path: name.to_owned(),
            source,
        })?;
        if draft && !self.config.build_drafts {
            tracing::debug!(path = name, "Skipping draft");
            return Ok(None);
        }

        let html = if top_level && name == HOME_PAGE_SOURCE {
            doc.html
        } else {
            self.render_page(name, &doc.metadata, &doc.html)?
        };

        Ok(Some(Node::Page {
            name: format!("{stem}.html"),
            content: html.into_bytes(),
            metadata: Some(doc.metadata),
        }))
    }

    fn render_page(&self, name: &str, metadata: &Metadata, body: &str) -> Result<String, BuildError> {
        let field = |key: &str| metadata.get(key).map_or("", String::as_str);
        let title = metadata
            .get("title")
            .ok_or_else(|| BuildError::MissingTitle {
                path: name.to_owned(),
            })?;

        let data = PageData {
            site_title: &self.config.title,
            title,
            author: field("author"),
            theme: &self.config.theme,
            published_date: field("date"),
            body,
            enable_hot_reloading: self.config.enable_hot_reloading,
        };

        self.templates
            .render_page(&data)
            .map_err(|source| BuildError::Template {
                path: name.to_owned(),
                source: Box::new(source),
            })
    }

    fn build_index(&self, content: &Node) -> Result<Node, BuildError> {
        let entries: Vec<IndexEntry> = content.children().iter().map(index_entry).collect();

        let data = IndexData {
            site_title: &self.config.title,
            theme: &self.config.theme,
            entries: &entries,
            enable_hot_reloading: self.config.enable_hot_reloading,
        };
        let html = self
            .templates
            .render_index(&data)
            .map_err(|source| BuildError::Template {
                path: INDEX_FILENAME.to_owned(),
                source: Box::new(source),
            })?;

        tracing::debug!(entries = entries.len(), "Synthesized index page");

        Ok(Node::Page {
            name: INDEX_FILENAME.to_owned(),
            content: html.into_bytes(),
            metadata: None,
        })
    }
}

fn index_entry(node: &Node) -> IndexEntry {
    let name = node.name();
    let relative = name
        .strip_prefix(CONTENT_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name);
    let title = if node.is_directory() {
        relative
    } else {
        relative.rsplit_once('.').map_or(relative, |(stem, _)| stem)
    };
    let date = node
        .metadata()
        .and_then(|metadata| metadata.get("date"))
        .cloned()
        .unwrap_or_default();

    IndexEntry {
        title: title.to_owned(),
        link: format!("/{name}"),
        date,
    }
}
