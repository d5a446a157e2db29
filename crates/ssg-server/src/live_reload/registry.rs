//! Registry of connected live-reload clients.
//!
//! Each client subscribes to one URL path and owns a bounded queue. After a
//! rebuild, [`ClientRegistry::notify`] resolves every client's path in the
//! new snapshot and queues that route for the client's socket task.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::routes::{Route, SiteSnapshot};

/// Pending updates allowed per client before new ones are dropped.
const CLIENT_QUEUE_CAPACITY: usize = 8;

struct Client {
    path: String,
    sender: mpsc::Sender<Route>,
}

/// Thread-safe set of subscribed clients.
#[derive(Default)]
pub(crate) struct ClientRegistry {
    next_id: AtomicU64,
    clients: Mutex<HashMap<u64, Client>>,
}

impl ClientRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Subscribe a client to `path`.
    ///
    /// The client stays registered until the returned guard is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub(crate) fn register(
        self: &Arc<Self>,
        path: String,
    ) -> (ClientGuard, mpsc::Receiver<Route>) {
        let (sender, receiver) = mpsc::channel(CLIENT_QUEUE_CAPACITY);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(client = id, path = %path, "Live reload client subscribed");
        self.clients
            .lock()
            .unwrap()
            .insert(id, Client { path, sender });

        let guard = ClientGuard {
            registry: Arc::clone(self),
            id,
        };
        (guard, receiver)
    }

    fn unregister(&self, id: u64) {
        if self.clients.lock().unwrap().remove(&id).is_some() {
            tracing::debug!(client = id, "Live reload client unsubscribed");
        }
    }

    /// Number of subscribed clients.
    pub(crate) fn len(&self) -> usize {
        self.clients.lock().unwrap().len()
    }

    /// Queue each client's page from `snapshot`.
    ///
    /// Clients whose path no longer resolves get nothing. A full queue drops
    /// the update; a closed queue removes the client.
    pub(crate) fn notify(&self, snapshot: &SiteSnapshot) {
        let mut clients = self.clients.lock().unwrap();

        clients.retain(|id, client| {
            let Some(route) = snapshot.resolve(&client.path) else {
                tracing::debug!(client = id, path = %client.path, "No page for live reload client");
                return true;
            };

            match client.sender.try_send(route.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(client = id, path = %client.path, "Live reload queue full, dropping update");
                    true
                }
                Err(TrySendError::Closed(_)) => false,
            }
        });

        tracing::debug!(clients = clients.len(), "Notified live reload clients");
    }
}

/// Unregisters its client when dropped.
pub(crate) struct ClientGuard {
    registry: Arc<ClientRegistry>,
    id: u64,
}

impl Drop for ClientGuard {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}
