//! Live reload: filesystem watching, debounced rebuilds and page push.

mod debouncer;
mod manager;
mod registry;
mod websocket;

pub(crate) use debouncer::DEFAULT_DEBOUNCE;
pub(crate) use manager::LiveReloadManager;
pub(crate) use registry::ClientRegistry;
pub(crate) use websocket::ws_handler;
