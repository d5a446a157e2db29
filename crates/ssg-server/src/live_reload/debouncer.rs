//! Event debouncing for live reload.
//!
//! Editors often emit several filesystem events per save. The rebuild loop
//! waits for the first event, lets the batch settle for the debounce
//! window, then drains everything queued meanwhile so the batch costs a
//! single rebuild.

use std::time::Duration;

use tokio::sync::mpsc;

/// Default debounce window.
pub(crate) const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Wait for the next batch of events.
///
/// Returns the number of events coalesced into the batch, or `None` once
/// the sender side is closed and no events remain.
pub(crate) async fn next_batch<T>(rx: &mut mpsc::Receiver<T>, window: Duration) -> Option<usize> {
    rx.recv().await?;
    tokio::time::sleep(window).await;

    let mut count = 1;
    while rx.try_recv().is_ok() {
        count += 1;
    }
    Some(count)
}
