//! Build error types.

use ssg_config::{CONFIG_FILENAME, ConfigError};
use ssg_markdown::MarkdownError;

use crate::entry::LoadError;

/// Invalid `draft` frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for draft {0}, expected true or false")]
pub struct InvalidDraft(pub String);

/// Error returned when a site cannot be built.
///
/// The first failure aborts the build; no partial site is produced.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source tree could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// No top-level config file.
    #[error("no {CONFIG_FILENAME} file found in project root")]
    MissingConfig,
    /// Config file is malformed or lacks a required key.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No top-level `themes` directory.
    #[error("no themes/ directory in project root")]
    MissingThemesDir,
    /// Configured theme has no stylesheet.
    #[error("theme {0} not found in themes/")]
    ThemeNotFound(String),
    /// Markdown conversion failed.
    #[error("{path}: {source}")]
    Markdown {
        path: String,
        #[source]
        source: MarkdownError,
    },
    /// `draft` frontmatter is neither `true` nor `false`.
    #[error("{path}: {source}")]
    Draft {
        path: String,
        #[source]
        source: InvalidDraft,
    },
    /// Page has no `title` frontmatter.
    #[error("{path}: blog title not found")]
    MissingTitle { path: String },
    /// Template rendering failed.
    #[error("{path}: failed to render template: {source}")]
    Template {
        path: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}
