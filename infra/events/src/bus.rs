use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{trace, warn};

/// Buffer size for channels created implicitly by `publish` or `subscribe`.
const DEFAULT_CAPACITY: usize = 64;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct Channel {
    capacity: usize,
    sender: Box<dyn Any + Send + Sync>,
}

/// Thread-safe, cheaply cloneable broadcast bus indexed by event [`TypeId`].
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, Channel>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to events of type `T` with the default buffer.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the stored channel has a different type.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes with an explicit buffer. The first caller for `T` fixes the capacity;
    /// later mismatches are logged and ignored.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] for zero and
    /// [`EventBusError::TypeMismatch`] on an internal type confusion.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "capacity must be >= 1".into(),
                context: Some(std::any::type_name::<T>().into()),
            });
        }
        Ok(self.sender::<T>(capacity)?.subscribe())
    }

    /// Publishes an event, returning the number of receivers that got it.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] on an internal type confusion.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes an already shared event without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] on an internal type confusion.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.sender::<T>(DEFAULT_CAPACITY)?;
        let delivered = sender.send(event).unwrap_or_default();
        trace!(event = std::any::type_name::<T>(), delivered, "Event dispatched");
        Ok(delivered)
    }

    /// Number of live receivers for `T`.
    #[must_use]
    pub fn receiver_count<T: Event>(&self) -> usize {
        let channels = self.channels.read();
        channels
            .get(&TypeId::of::<T>())
            .and_then(|c| c.sender.downcast_ref::<broadcast::Sender<Arc<T>>>())
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Drops every channel; outstanding receivers observe `Closed`.
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn sender<T: Event>(&self, capacity: usize) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        if let Some(channel) = self.channels.read().get(&id) {
            return Self::downcast::<T>(channel, capacity);
        }

        let mut channels = self.channels.write();
        let channel = channels.entry(id).or_insert_with(|| {
            trace!(event = std::any::type_name::<T>(), capacity, "Initializing event channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            Channel { capacity, sender: Box::new(tx) }
        });
        Self::downcast::<T>(channel, capacity)
    }

    fn downcast<T: Event>(
        channel: &Channel,
        requested: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        if channel.capacity != requested && requested != DEFAULT_CAPACITY {
            warn!(
                event = std::any::type_name::<T>(),
                existing_capacity = channel.capacity,
                requested_capacity = requested,
                "Channel already initialized with a different capacity"
            );
        }
        channel.sender.downcast_ref::<broadcast::Sender<Arc<T>>>().cloned().ok_or_else(|| {
            EventBusError::TypeMismatch {
                message: std::any::type_name::<T>().into(),
                context: Some("Unexpected event type".into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Saved(u32);

    #[derive(Debug, Clone, PartialEq)]
    struct Other;

    #[test]
    fn publish_without_subscribers_delivers_nothing() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(Saved(1)).unwrap(), 0);
    }

    #[test]
    fn receiver_count_tracks_subscriptions() {
        let bus = EventBus::new();
        assert_eq!(bus.receiver_count::<Saved>(), 0);
        let rx1 = bus.subscribe::<Saved>().unwrap();
        let _rx2 = bus.subscribe::<Saved>().unwrap();
        assert_eq!(bus.receiver_count::<Saved>(), 2);
        assert_eq!(bus.receiver_count::<Other>(), 0);
        drop(rx1);
        assert_eq!(bus.receiver_count::<Saved>(), 1);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let bus = EventBus::new();
        let err = bus.subscribe_with_capacity::<Saved>(0).unwrap_err();
        assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
    }

    #[test]
    fn shutdown_clears_channels() {
        let bus = EventBus::new();
        let _rx = bus.subscribe::<Saved>().unwrap();
        let _other = bus.subscribe::<Other>().unwrap();
        assert_eq!(bus.shutdown(), 2);
        assert_eq!(bus.receiver_count::<Saved>(), 0);
    }
}
