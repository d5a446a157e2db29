//! Built site.

use std::path::Path;
use std::time::Instant;

use crate::builder::SiteBuilder;
use crate::config::{BuildOptions, SiteConfig};
use crate::entry::{Entry, load_entries};
use crate::error::BuildError;
use crate::node::{Node, NodeKind, find_in};

/// Result of one build: the top-level nodes and the configuration used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Site {
    pub nodes: Vec<Node>,
    pub config: SiteConfig,
}

impl Site {
    /// Load `source_dir` from disk and build it.
    ///
    /// # Errors
    ///
    /// Returns the first load, configuration or content error.
    pub fn build(source_dir: &Path, options: BuildOptions) -> Result<Self, BuildError> {
        let start = Instant::now();
        let entries = load_entries(source_dir)?;
        let site = Self::from_entries(&entries, options)?;

        tracing::info!(
            path = %source_dir.display(),
            pages = site.count(NodeKind::HtmlPage),
            static_files = site.count(NodeKind::StaticFile),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Built site"
        );

        Ok(site)
    }

    /// Build from an already loaded entry tree.
    ///
    /// # Errors
    ///
    /// Returns the first configuration or content error.
    pub fn from_entries(entries: &[Entry], options: BuildOptions) -> Result<Self, BuildError> {
        let config = SiteConfig::resolve(entries, options)?;
        let builder = SiteBuilder::new(config);
        let nodes = builder.build(entries)?;

        Ok(Self {
            nodes,
            config: builder.into_config(),
        })
    }

    /// Find a node by its full name at any depth.
    pub fn find(&self, name: &str) -> Option<&Node> {
        find_in(&self.nodes, name)
    }

    /// Top-level landing page, if the site has one.
    pub fn index(&self) -> Option<&Node> {
        self.nodes.iter().find(|node| node.is_index())
    }

    /// Number of nodes of `kind` at any depth.
    pub fn count(&self, kind: NodeKind) -> usize {
        fn count_in(nodes: &[Node], kind: NodeKind) -> usize {
            nodes
                .iter()
                .map(|node| usize::from(node.kind() == kind) + count_in(node.children(), kind))
                .sum()
        }
        count_in(&self.nodes, kind)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn blog(root: &Path) {
        write(root, "ssg.toml", "title = \"T\"\nauthor = \"A\"\ntheme = \"dark\"\n");
        write(root, "themes/dark.css", "body { color: #eee; }");
        write(root, "content/a.md", "+++\ntitle = Hello\n+++\n\nHello, World\n");
    }

    #[test]
    fn test_build_blog() {
        let temp = TempDir::new().unwrap();
        blog(temp.path());

        let site = Site::build(temp.path(), BuildOptions::default()).unwrap();

        assert_eq!(site.config.title, "T");
        assert_eq!(site.config.author, "A");
        assert_eq!(site.config.theme, "/themes/dark.css");

        let content = site.find("content").unwrap();
        assert_eq!(content.kind(), NodeKind::Directory);
        assert_eq!(content.children().len(), 1);
        assert_eq!(content.children()[0].name(), "content/a.html");
        assert_eq!(content.children()[0].kind(), NodeKind::HtmlPage);

        let index = site.index().unwrap();
        assert_eq!(index.name(), "index.html");
        let html = String::from_utf8(index.content().unwrap().to_vec()).unwrap();
        assert!(html.contains("<a href=\"/content/a.html\">a</a>"));

        // ssg.toml is kept as a static node; the writer decides what to emit
        assert_eq!(site.count(NodeKind::HtmlPage), 2);
        assert!(site.find("ssg.toml").is_some());
    }

    #[test]
    fn test_build_is_deterministic() {
        let temp = TempDir::new().unwrap();
        blog(temp.path());
        write(temp.path(), "content/b.md", "+++\ntitle = B\ndate = 2025-02-01\n+++\nb");
        write(temp.path(), "content/nested/c.md", "+++\ntitle = C\n+++\nc");
        write(temp.path(), "static/logo.svg", "<svg/>");

        let first = Site::build(temp.path(), BuildOptions::default()).unwrap();
        let second = Site::build(temp.path(), BuildOptions::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_drafts_toggle() {
        let temp = TempDir::new().unwrap();
        blog(temp.path());
        write(temp.path(), "content/wip.md", "+++\ntitle = WIP\ndraft = true\n+++\nwip");

        let published = Site::build(temp.path(), BuildOptions::default()).unwrap();
        assert!(published.find("content/wip.html").is_none());

        let drafts = Site::build(
            temp.path(),
            BuildOptions {
                build_drafts: true,
                ..BuildOptions::default()
            },
        )
        .unwrap();
        assert!(drafts.find("content/wip.html").is_some());
    }

    #[test]
    fn test_hot_reloading_embeds_script() {
        let temp = TempDir::new().unwrap();
        blog(temp.path());

        let site = Site::build(
            temp.path(),
            BuildOptions {
                enable_hot_reloading: true,
                ..BuildOptions::default()
            },
        )
        .unwrap();

        let page = site.find("content/a.html").unwrap();
        let html = String::from_utf8(page.content().unwrap().to_vec()).unwrap();
        assert!(html.contains(crate::LIVE_RELOAD_PATH));
    }

    #[test]
    fn test_missing_theme_key_fails() {
        let temp = TempDir::new().unwrap();
        blog(temp.path());
        write(temp.path(), "ssg.toml", "title = \"T\"\nauthor = \"A\"\n");

        let err = Site::build(temp.path(), BuildOptions::default()).unwrap_err();

        assert_eq!(err.to_string(), "no theme provided in ssg.toml");
    }

    #[test]
    fn test_missing_source_dir_fails() {
        let temp = TempDir::new().unwrap();

        let err = Site::build(&temp.path().join("nope"), BuildOptions::default()).unwrap_err();

        assert!(matches!(err, BuildError::Load(_)));
    }

    #[test]
    fn test_no_landing_page() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "ssg.toml", "title = \"T\"\nauthor = \"A\"\ntheme = \"dark\"\n");
        write(temp.path(), "themes/dark.css", "");
        write(temp.path(), "about.md", "+++\ntitle = About\n+++\nabout");

        let site = Site::build(temp.path(), BuildOptions::default()).unwrap();

        assert!(site.index().is_none());
        assert!(site.find("about.html").is_some());
    }
}
