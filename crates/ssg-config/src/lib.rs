//! Site configuration for ssg.
//!
//! Parses the `ssg.toml` file found at the root of a site into a flat
//! string map and extracts the settings every build requires.
//!
//! ```toml
//! title = "A Blog"
//! author = "Jane Doe"
//! theme = "rose-pine"
//! ```
//!
//! Only top-level string values are accepted. Tables, arrays and other
//! scalar types are rejected with an error naming the offending key.

use std::collections::BTreeMap;

/// Name of the configuration file expected at the site root.
pub const CONFIG_FILENAME: &str = "ssg.toml";

/// Parsed configuration: key to string value.
pub type ConfigMap = BTreeMap<String, String>;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File is not valid UTF-8.
    #[error("{CONFIG_FILENAME} is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value was not a plain string.
    #[error("expected a string value for {key}, found {found}")]
    NonStringValue {
        /// Offending key.
        key: String,
        /// TOML type that was found instead.
        found: &'static str,
    },
    /// `title` key is missing.
    #[error("no title provided in {CONFIG_FILENAME}")]
    MissingTitle,
    /// `author` key is missing.
    #[error("no author provided in {CONFIG_FILENAME}")]
    MissingAuthor,
    /// `theme` key is missing.
    #[error("no theme provided in {CONFIG_FILENAME}")]
    MissingTheme,
}

/// Parse raw configuration bytes into a string map.
///
/// # Errors
///
/// Returns an error if the input is not UTF-8, not valid TOML, or contains
/// a value that is not a string.
pub fn parse(raw: &[u8]) -> Result<ConfigMap, ConfigError> {
    let text = std::str::from_utf8(raw)?;
    let table: toml::Table = toml::from_str(text)?;

    table
        .into_iter()
        .map(|(key, value)| match value {
            toml::Value::String(s) => Ok((key, s)),
            other => Err(ConfigError::NonStringValue {
                key,
                found: other.type_str(),
            }),
        })
        .collect()
}

/// Settings every site must declare in `ssg.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteSettings {
    /// Site title shown on every page.
    pub title: String,
    /// Site author.
    pub author: String,
    /// Bare theme name; resolved against `themes/` by the site builder.
    pub theme: String,
}

impl SiteSettings {
    /// Extract the required settings from a parsed map.
    ///
    /// Keys are checked in order `title`, `author`, `theme`; the first missing
    /// key determines the error.
    pub fn from_map(map: &ConfigMap) -> Result<Self, ConfigError> {
        let title = map.get("title").ok_or(ConfigError::MissingTitle)?;
        let author = map.get("author").ok_or(ConfigError::MissingAuthor)?;
        let theme = map.get("theme").ok_or(ConfigError::MissingTheme)?;

        Ok(Self {
            title: title.clone(),
            author: author.clone(),
            theme: theme.clone(),
        })
    }

    /// Parse raw `ssg.toml` bytes and extract the settings.
    pub fn parse(raw: &[u8]) -> Result<Self, ConfigError> {
        Self::from_map(&parse(raw)?)
    }
}
