//! Live reload manager.
//!
//! Watches the source directory, rebuilds the whole site after each
//! debounced batch of changes, swaps the new snapshot into [`AppState`] and
//! then pushes fresh pages to subscribed clients.

use std::path::{Component, Path};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use ssg_site::Site;
use tokio::sync::mpsc;

use super::debouncer;
use crate::error::ServerError;
use crate::routes::SiteSnapshot;
use crate::state::AppState;

/// Raw events buffered between the watcher thread and the rebuild task.
const EVENT_QUEUE_CAPACITY: usize = 100;

/// Owns the filesystem watcher. Watching stops when this is dropped.
pub(crate) struct LiveReloadManager {
    _watcher: RecommendedWatcher,
}

impl LiveReloadManager {
    /// Start watching `state.source_dir` and spawn the rebuild loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file watcher cannot be created.
    pub(crate) fn start(state: Arc<AppState>, debounce: Duration) -> Result<Self, notify::Error> {
        let (tx, mut rx) = mpsc::channel::<Event>(EVENT_QUEUE_CAPACITY);
        // notify reports canonical paths on some platforms
        let source_dir = state
            .source_dir
            .canonicalize()
            .unwrap_or_else(|_| state.source_dir.clone());
        let watch_root = source_dir.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) if is_relevant(&event, &source_dir) => {
                    tracing::debug!(paths = ?event.paths, kind = ?event.kind, "Recorded filesystem event");
                    // A full queue already guarantees a rebuild
                    let _ = tx.try_send(event);
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "File watcher error"),
            }
        })?;
        watcher.watch(&watch_root, RecursiveMode::Recursive)?;

        tokio::spawn(async move {
            while let Some(events) = debouncer::next_batch(&mut rx, debounce).await {
                let start = Instant::now();
                match rebuild(&state).await {
                    Ok(snapshot) => tracing::info!(
                        events,
                        routes = snapshot.routes.len(),
                        clients = state.clients.len(),
                        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "Site rebuilt"
                    ),
                    Err(err) => {
                        tracing::error!(error = %err, "Rebuild failed, serving previous site");
                    }
                }
            }
        });

        tracing::info!(path = %watch_root.display(), "Watching for changes");
        Ok(Self { _watcher: watcher })
    }
}

/// Rebuild the site, swap it in and notify clients.
///
/// The previous snapshot stays in place on failure.
pub(crate) async fn rebuild(state: &AppState) -> Result<Arc<SiteSnapshot>, ServerError> {
    let source_dir = state.source_dir.clone();
    let options = state.options;
    let site = tokio::task::spawn_blocking(move || Site::build(&source_dir, options)).await??;

    let snapshot = state.replace(SiteSnapshot::new(site)?);
    state.clients.notify(&snapshot);
    Ok(snapshot)
}

/// Whether an event should trigger a rebuild.
///
/// Only creations, modifications and removals count, and only for paths
/// inside `source_dir` without a hidden component.
fn is_relevant(event: &Event, source_dir: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|path| is_visible_source_path(path, source_dir))
}

fn is_visible_source_path(path: &Path, source_dir: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(source_dir) else {
        return false;
    };

    !relative.components().any(|component| match component {
        Component::Normal(segment) => segment.to_string_lossy().starts_with('.'),
        _ => false,
    })
}
