//! `ssg build` command implementation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use ssg_site::{BuildError, BuildOptions, Site, load_entries, remove_entry, write_site};

use crate::error::CliError;
use crate::output::Output;

/// Default output directory, relative to the working directory.
const DEFAULT_BUILD_DIR: &str = "ssg-build";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Site source directory (must contain ssg.toml and themes/).
    pub(crate) site_dir: PathBuf,

    /// Output directory. Its non-hidden contents are replaced.
    #[arg(long, default_value = DEFAULT_BUILD_DIR)]
    pub(crate) build_dir: PathBuf,

    /// Include pages marked `draft = true`.
    #[arg(short = 'D', long, visible_alias = "draft")]
    pub(crate) drafts: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site fails to build or cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let start = Instant::now();

        check_distinct(&self.site_dir, &self.build_dir)?;

        output.info(&format!("Source: {}", self.site_dir.display()));
        output.info(&format!("Output: {}", self.build_dir.display()));

        let options = BuildOptions {
            build_drafts: self.drafts,
            enable_hot_reloading: false,
        };
        let mut entries = load_entries(&self.site_dir).map_err(BuildError::from)?;
        // Previous output under the site dir must not become source content
        if let Some(name) = nested_output(&self.site_dir, &self.build_dir)
            && remove_entry(&mut entries, &name)
        {
            tracing::debug!(path = %name, "Excluded build directory from sources");
        }
        let site = Site::from_entries(&entries, options)?;
        let summary = write_site(&site, &self.build_dir)?;

        output.build_summary(&summary, &self.build_dir, start.elapsed());
        Ok(())
    }
}

/// Refuse to write the output over the sources.
fn check_distinct(site_dir: &Path, build_dir: &Path) -> Result<(), CliError> {
    // Missing directories are reported by the build itself
    let Ok(site) = site_dir.canonicalize() else {
        return Ok(());
    };
    let same = build_dir
        .canonicalize()
        .is_ok_and(|build| build == site || site.starts_with(&build));

    if same {
        return Err(CliError::Validation(format!(
            "build directory {} would overwrite the site sources",
            build_dir.display()
        )));
    }
    Ok(())
}

/// Site-relative entry name of `build_dir` when it lives inside `site_dir`.
fn nested_output(site_dir: &Path, build_dir: &Path) -> Option<String> {
    let site = site_dir.canonicalize().ok()?;
    let build = build_dir.canonicalize().ok()?;
    let relative = build.strip_prefix(&site).ok()?;

    let segments = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>();
    (!segments.is_empty()).then(|| segments.join("/"))
}
