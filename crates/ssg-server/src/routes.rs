//! Request routing over a built site.
//!
//! A [`SiteRoutes`] table is built once per [`Site`] and maps every URL path
//! the site answers to its response body and content type:
//!
//! - `/<name>` for every page and static file at any depth
//! - `/<dir>` and `/<dir>/` for directories with an `index.html` child
//! - `/` for the top-level `index.html`

use std::collections::HashMap;

use axum::body::Bytes;
use percent_encoding::percent_decode_str;
use ssg_site::{Node, Site};

use crate::error::ServerError;

/// First path segment owned by the server itself.
pub const RESERVED_SEGMENT: &str = "ws";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A resolved response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub content: Bytes,
    pub content_type: &'static str,
}

impl Route {
    fn for_node(node: &Node) -> Option<Self> {
        let content_type = match node {
            Node::Page { .. } => HTML_CONTENT_TYPE,
            Node::Static { name, .. } => mime_for(name),
            Node::Directory { .. } => return node.index_child().and_then(Self::for_node),
        };
        let content = Bytes::copy_from_slice(node.content()?);

        Some(Self {
            content,
            content_type,
        })
    }

    /// Whether the body is valid UTF-8.
    pub fn is_text(&self) -> bool {
        std::str::from_utf8(&self.content).is_ok()
    }
}

/// MIME type for a static file name.
fn mime_for(name: &str) -> &'static str {
    mime_guess::from_path(name).first_raw().unwrap_or("application/octet-stream")
}

/// Path lookup table for one site.
#[derive(Debug, Default)]
pub struct SiteRoutes {
    routes: HashMap<String, Route>,
}

impl SiteRoutes {
    /// Build the routing table.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::ReservedPath`] if a top-level node is named
    /// `ws` or lives under it.
    pub fn new(site: &Site) -> Result<Self, ServerError> {
        if let Some(node) = site.nodes.iter().find(|node| is_reserved(node.name())) {
            return Err(ServerError::ReservedPath(node.name().to_owned()));
        }

        let mut routes = HashMap::new();
        insert_nodes(&mut routes, &site.nodes);
        if let Some(route) = site.index().and_then(Route::for_node) {
            routes.insert("/".to_owned(), route);
        }

        Ok(Self { routes })
    }

    /// Resolve a request path. Percent-encoded paths are decoded first.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.get(path).or_else(|| {
            let decoded = percent_decode_str(path).decode_utf8().ok()?;
            self.routes.get(&*decoded)
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn is_reserved(name: &str) -> bool {
    name == RESERVED_SEGMENT
        || name
            .strip_prefix(RESERVED_SEGMENT)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn insert_nodes(routes: &mut HashMap<String, Route>, nodes: &[Node]) {
    for node in nodes {
        if let Some(route) = Route::for_node(node) {
            if node.is_directory() {
                routes.insert(format!("/{}/", node.name()), route.clone());
            }
            routes.insert(format!("/{}", node.name()), route);
        }
        insert_nodes(routes, node.children());
    }
}

/// A site together with its routing table.
///
/// Snapshots are immutable; a rebuild produces a new one.
#[derive(Debug)]
pub struct SiteSnapshot {
    pub site: Site,
    pub routes: SiteRoutes,
}

impl SiteSnapshot {
    /// # Errors
    ///
    /// Fails when the site has a node on a reserved path.
    pub fn new(site: Site) -> Result<Self, ServerError> {
        let routes = SiteRoutes::new(&site)?;
        Ok(Self { site, routes })
    }

    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.resolve(path)
    }
}
