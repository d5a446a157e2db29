//! Application state.
//!
//! Shared state for all request handlers and the rebuild loop.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use ssg_site::BuildOptions;

use crate::live_reload::ClientRegistry;
use crate::routes::SiteSnapshot;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Current site and routing table, replaced wholesale on rebuild.
    snapshot: RwLock<Arc<SiteSnapshot>>,
    /// Connected live-reload clients.
    pub(crate) clients: Arc<ClientRegistry>,
    /// Site source directory.
    pub(crate) source_dir: PathBuf,
    /// Options every rebuild uses.
    pub(crate) options: BuildOptions,
}

impl AppState {
    pub(crate) fn new(source_dir: PathBuf, options: BuildOptions, snapshot: SiteSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            clients: Arc::new(ClientRegistry::new()),
            source_dir,
            options,
        }
    }

    /// Current snapshot. The lock is released before returning.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub(crate) fn snapshot(&self) -> Arc<SiteSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap())
    }

    /// Swap in a new snapshot and return it.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub(crate) fn replace(&self, snapshot: SiteSnapshot) -> Arc<SiteSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.snapshot.write().unwrap() = Arc::clone(&snapshot);
        snapshot
    }

    /// Check if live reload is enabled.
    #[must_use]
    pub(crate) fn live_reload_enabled(&self) -> bool {
        self.options.enable_hot_reloading
    }
}
