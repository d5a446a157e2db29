//! Page and index templates.
//!
//! Templates are handlebars sources compiled once into an immutable
//! [`Templates`] value. The embedded defaults live in `templates/`.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

/// WebSocket endpoint the live-reload script connects to.
pub const LIVE_RELOAD_PATH: &str = "/ws/live-reload";

const PAGE: &str = "page";
const INDEX: &str = "index";
const LIVE_RELOAD: &str = "live_reload";

const PAGE_SOURCE: &str = include_str!("../templates/page.hbs");
const INDEX_SOURCE: &str = include_str!("../templates/index.hbs");
const LIVE_RELOAD_SOURCE: &str = include_str!("../templates/live_reload.hbs");

/// Data passed to the page template.
#[derive(Debug, Serialize)]
pub struct PageData<'a> {
    pub site_title: &'a str,
    pub title: &'a str,
    pub author: &'a str,
    pub theme: &'a str,
    pub published_date: &'a str,
    /// Sanitized HTML, inserted unescaped.
    pub body: &'a str,
    pub enable_hot_reloading: bool,
}

/// Data passed to the index template.
#[derive(Debug, Serialize)]
pub struct IndexData<'a> {
    pub site_title: &'a str,
    pub theme: &'a str,
    pub entries: &'a [IndexEntry],
    pub enable_hot_reloading: bool,
}

/// One row of the synthesized index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub title: String,
    pub link: String,
    pub date: String,
}

/// Compiled page and index templates.
///
/// Both templates may include the `live_reload` partial.
#[derive(Debug)]
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    /// Templates compiled from the embedded sources.
    ///
    /// # Panics
    ///
    /// Panics if an embedded template fails to compile, which is covered by
    /// the unit tests.
    pub fn embedded() -> Self {
        Self::from_sources(PAGE_SOURCE, INDEX_SOURCE)
            .expect("embedded templates are valid handlebars")
    }

    /// Compile custom page and index templates.
    ///
    /// Undefined variables are errors at render time.
    ///
    /// # Errors
    ///
    /// Returns an error if either source is not valid handlebars.
    pub fn from_sources(page: &str, index: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_partial(LIVE_RELOAD, LIVE_RELOAD_SOURCE)?;
        registry.register_template_string(PAGE, page)?;
        registry.register_template_string(INDEX, index)?;
        Ok(Self { registry })
    }

    /// Render a blog page.
    pub fn render_page(&self, data: &PageData<'_>) -> Result<String, RenderError> {
        self.registry.render(PAGE, data)
    }

    /// Render the site index.
    pub fn render_index(&self, data: &IndexData<'_>) -> Result<String, RenderError> {
        self.registry.render(INDEX, data)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page_data(enable_hot_reloading: bool) -> PageData<'static> {
        PageData {
            site_title: "My Blog",
            title: "Hello & welcome",
            author: "Jane",
            theme: "/themes/dark.css",
            published_date: "2025-01-06",
            body: "<p>Body</p>",
            enable_hot_reloading,
        }
    }

    #[test]
    fn test_render_page() {
        let html = Templates::embedded().render_page(&page_data(false)).unwrap();

        assert!(html.contains("<title>Hello &amp; welcome | My Blog</title>"));
        assert!(html.contains("href=\"/themes/dark.css\""));
        assert!(html.contains("<time>2025-01-06</time>"));
        assert!(html.contains("<p>Body</p>"));
        assert!(!html.contains(LIVE_RELOAD_PATH));
    }

    #[test]
    fn test_render_page_with_hot_reloading() {
        let html = Templates::embedded().render_page(&page_data(true)).unwrap();

        assert!(html.contains("<script>"));
        assert!(html.contains(LIVE_RELOAD_PATH));
    }

    #[test]
    fn test_render_index() {
        let entries = vec![
            IndexEntry {
                title: "a".to_owned(),
                link: "/content/a.html".to_owned(),
                date: "2025-01-06".to_owned(),
            },
            IndexEntry {
                title: "b".to_owned(),
                link: "/content/b.html".to_owned(),
                date: String::new(),
            },
        ];

        let html = Templates::embedded()
            .render_index(&IndexData {
                site_title: "My Blog",
                theme: "/themes/dark.css",
                entries: &entries,
                enable_hot_reloading: false,
            })
            .unwrap();

        assert!(html.contains("<a href=\"/content/a.html\">a</a> <time>2025-01-06</time>"));
        assert!(html.contains("<a href=\"/content/b.html\">b</a>"));
    }

    #[test]
    fn test_custom_sources() {
        let templates =
            Templates::from_sources("{{title}}:{{{body}}}", "{{#each entries}}{{title}};{{/each}}")
                .unwrap();

        assert_eq!(templates.render_page(&page_data(false)).unwrap(), "Hello &amp; welcome:<p>Body</p>");
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variable() {
        let templates = Templates::from_sources("{{subtitle}}", "").unwrap();

        assert!(templates.render_page(&page_data(false)).is_err());
    }

    #[test]
    fn test_invalid_source() {
        assert!(Templates::from_sources("{{#if}}", "").is_err());
    }
}
