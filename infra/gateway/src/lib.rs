//! # Gateways
//!
//! Implementations of [`ConfigGateway`] and [`ApproachDirectory`]:
//!
//! * [`MemoryGateway`]: process-local maps, with per-operation fault and latency
//!   injection for exercising degraded paths and save races.
//! * [`FileGateway`]: one JSON document per brand, override and approach under a root
//!   directory, written atomically (temp file, fsync, rename).
//!
//! Both also manage the client lifecycle (`create_client`, cascading `delete_client`)
//! and approach membership (`put_approach`).

mod failure;
mod file;
mod memory;

pub use crate::failure::{FailureInjector, GatewayOp};
pub use crate::file::FileGateway;
pub use crate::memory::MemoryGateway;
pub use pforge_kernel::gateway::{ApproachDirectory, ConfigGateway, GatewayError, GatewayErrorExt};
