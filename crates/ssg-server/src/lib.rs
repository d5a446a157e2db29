//! Live development server for ssg.
//!
//! Serves a built site from memory with axum, rebuilding it whenever the
//! source directory changes:
//!
//! - every page and static file is answered from the current [`SiteSnapshot`]
//! - a `notify` watcher feeds a debounced rebuild loop
//! - browsers subscribe over a WebSocket at `/ws/live-reload` and receive the
//!   fresh content of the page they have open after each rebuild
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use ssg_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("blog"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router ──► AppState (RwLock<Arc<SiteSnapshot>>)
//!    ▲                                  ▲
//!    │                                  │ swap, then notify
//!    └──WebSocket── ClientRegistry ◄── rebuild loop ◄── debouncer ◄── notify
//! ```

mod app;
mod error;
mod handlers;
mod live_reload;
mod middleware;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ssg_site::{BuildOptions, Site};
use state::AppState;

pub use error::ServerError;
pub use routes::{RESERVED_SEGMENT, Route, SiteRoutes, SiteSnapshot};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site source directory.
    pub source_dir: PathBuf,
    /// Include draft pages.
    pub build_drafts: bool,
    /// Enable live reload.
    pub live_reload_enabled: bool,
    /// Quiet period before a rebuild.
    pub debounce: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4200,
            source_dir: PathBuf::from("."),
            build_drafts: false,
            live_reload_enabled: true,
            debounce: live_reload::DEFAULT_DEBOUNCE,
        }
    }
}

impl ServerConfig {
    /// Build options every build of this server uses.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            build_drafts: self.build_drafts,
            enable_hot_reloading: self.live_reload_enabled,
        }
    }
}

/// Run the server.
///
/// Builds the site once, then serves it until Ctrl-C. Rebuild failures
/// after startup are logged and the previous site keeps being served.
///
/// # Errors
///
/// Returns an error if the initial build fails, the site has a node on a
/// reserved path, the watcher cannot start or the address cannot be bound.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let options = config.build_options();
    let source_dir = config.source_dir.clone();
    let site = tokio::task::spawn_blocking(move || Site::build(&source_dir, options)).await??;
    let snapshot = SiteSnapshot::new(site)?;

    let state = Arc::new(AppState::new(config.source_dir.clone(), options, snapshot));

    // Keep the watcher alive for the lifetime of the server
    let _live_reload = if config.live_reload_enabled {
        Some(live_reload::LiveReloadManager::start(
            Arc::clone(&state),
            config.debounce,
        )?)
    } else {
        None
    };

    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl+C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
