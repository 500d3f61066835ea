//! # Event Bus
//!
//! A small typed broadcast bus shared by every editing session of a process.
//!
//! Events are keyed by their Rust type; each type gets one `tokio::sync::broadcast`
//! channel created on first use. Publishing with no subscribers is not an error.
//!
//! # Example
//!
//! ```rust
//! use pforge_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct PaletteChanged { client_id: String }
//!
//! # fn main() -> Result<(), EventBusError> {
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe::<PaletteChanged>()?;
//! bus.publish(PaletteChanged { client_id: "acme".into() })?;
//!
//! let pending = rx.drain();
//! assert_eq!(pending.len(), 1);
//! assert_eq!(pending[0].client_id, "acme");
//! # Ok(())
//! # }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
pub use tokio::sync::broadcast::Receiver;
