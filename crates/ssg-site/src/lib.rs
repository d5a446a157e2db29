//! Site assembly for ssg.
//!
//! The pipeline runs in three steps:
//!
//! 1. [`load_entries`] reads the source directory into an [`Entry`] tree.
//! 2. [`Site::from_entries`] resolves [`SiteConfig`] from `ssg.toml` and
//!    `themes/`, then [`SiteBuilder`] converts markdown, filters drafts and
//!    synthesizes the landing page into a [`Node`] tree.
//! 3. [`write_site`] materializes the tree in an output directory, or the
//!    dev server serves it from memory.
//!
//! [`Site::build`] runs steps 1 and 2 together.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ssg_site::{BuildOptions, Site, write_site};
//!
//! let site = Site::build(Path::new("blog"), BuildOptions::default())?;
//! let summary = write_site(&site, Path::new("ssg-build"))?;
//! println!("{} pages", summary.pages);
//! ```

mod builder;
mod config;
mod entry;
mod error;
mod node;
mod site;
mod templates;
mod writer;

pub use builder::{CONTENT_DIR, SiteBuilder, is_draft};
pub use config::{BuildOptions, SiteConfig, THEMES_DIR};
pub use entry::{Entry, LoadError, load_entries, remove_entry};
pub use error::{BuildError, InvalidDraft};
pub use node::{INDEX_FILENAME, Node, NodeKind};
pub use site::Site;
pub use templates::{IndexData, IndexEntry, LIVE_RELOAD_PATH, PageData, Templates};
pub use writer::{PUBLISHABLE_EXTENSIONS, WriteError, WriteSummary, is_publishable_asset, write_site};
