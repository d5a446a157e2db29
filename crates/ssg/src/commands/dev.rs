//! `ssg dev` command implementation.

use std::path::PathBuf;

use clap::Args;
use ssg_server::{ServerConfig, run_server};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the dev command.
#[derive(Args)]
pub(crate) struct DevArgs {
    /// Site source directory (must contain ssg.toml and themes/).
    site_dir: PathBuf,

    /// Host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to.
    #[arg(short, long, default_value_t = 4200)]
    port: u16,

    /// Include pages marked `draft = true`.
    #[arg(short = 'D', long, visible_alias = "draft")]
    drafts: bool,

    /// Disable live reload.
    #[arg(long)]
    no_live_reload: bool,

    /// Enable verbose output (request and rebuild logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl DevArgs {
    /// Server configuration for these arguments.
    pub(crate) fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            source_dir: self.site_dir.clone(),
            build_drafts: self.drafts,
            live_reload_enabled: !self.no_live_reload,
            ..ServerConfig::default()
        }
    }

    /// Execute the dev command.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial build fails or the server fails to
    /// start. Rebuild failures while serving are only logged.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.server_config();

        output.dev_banner(&config);
        run_server(config).await?;

        Ok(())
    }
}
