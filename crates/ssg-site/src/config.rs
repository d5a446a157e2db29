//! Build configuration resolved from the source tree.

use ssg_config::{CONFIG_FILENAME, SiteSettings};

use crate::entry::Entry;
use crate::error::BuildError;

/// Name of the top-level directory holding theme stylesheets.
pub const THEMES_DIR: &str = "themes";

/// Caller-supplied build switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Include pages marked `draft = true`.
    pub build_drafts: bool,
    /// Embed the live-reload script in rendered pages.
    pub enable_hot_reloading: bool,
}

/// Configuration for a single build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub author: String,
    pub title: String,
    /// Site-root path of the theme stylesheet, e.g. `/themes/dark.css`.
    pub theme: String,
    pub build_drafts: bool,
    pub enable_hot_reloading: bool,
}

impl SiteConfig {
    /// Resolve configuration from the top-level entries of a source tree.
    ///
    /// Reads `ssg.toml`, then looks up `<theme>.css` inside `themes/`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingConfig`] without a config file,
    /// [`BuildError::Config`] when it is malformed or incomplete, and
    /// [`BuildError::MissingThemesDir`] or [`BuildError::ThemeNotFound`]
    /// when the theme cannot be resolved.
    pub fn resolve(entries: &[Entry], options: BuildOptions) -> Result<Self, BuildError> {
        let raw = entries
            .iter()
            .find(|entry| entry.name() == CONFIG_FILENAME)
            .and_then(Entry::content)
            .ok_or(BuildError::MissingConfig)?;
        let settings = SiteSettings::parse(raw)?;
        let theme = resolve_theme(entries, &settings.theme)?;

        Ok(Self {
            author: settings.author,
            title: settings.title,
            theme,
            build_drafts: options.build_drafts,
            enable_hot_reloading: options.enable_hot_reloading,
        })
    }
}

fn resolve_theme(entries: &[Entry], theme: &str) -> Result<String, BuildError> {
    let themes = entries
        .iter()
        .find(|entry| matches!(entry, Entry::Directory { name, .. } if name == THEMES_DIR))
        .ok_or(BuildError::MissingThemesDir)?;

    let stylesheet = format!("{theme}.css");
    themes
        .children()
        .iter()
        .find(|child| {
            !child.is_hidden() && child.content().is_some() && child.base_name() == stylesheet
        })
        .map(|child| format!("/{}", child.name()))
        .ok_or_else(|| BuildError::ThemeNotFound(theme.to_owned()))
}
