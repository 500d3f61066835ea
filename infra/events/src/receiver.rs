use crate::bus::Event;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, warn};

/// Lag-tolerant helpers for bus receivers.
///
/// A lagged receiver skips to the oldest retained event instead of failing;
/// consumers only care that something changed, not about every intermediate value.
pub trait EventReceiverExt<T> {
    /// Waits for the next event, returning `None` once the bus is closed.
    fn recv_event(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;

    /// Takes every event queued so far without waiting.
    fn drain(&mut self) -> Vec<Arc<T>>;
}

impl<T: Event> EventReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn recv_event(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;
        loop {
            match self.recv().await {
                Ok(event) => {
                    if skipped > 0 {
                        warn!(
                            event = std::any::type_name::<T>(),
                            skipped, "Receiver lagged; continuing from oldest retained event"
                        );
                    }
                    return Some(event);
                },
                Err(RecvError::Lagged(n)) => skipped = skipped.saturating_add(n),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    fn drain(&mut self) -> Vec<Arc<T>> {
        let mut events = Vec::new();
        loop {
            match self.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(n)) => {
                    debug!(event = std::any::type_name::<T>(), skipped = n, "Drain skipped events");
                },
                Err(TryRecvError::Empty | TryRecvError::Closed) => return events,
            }
        }
    }
}
