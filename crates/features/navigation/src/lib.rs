//! Element-to-screen navigation read from a resolved `navigation_config` map.
//!
//! The graph is directed and may contain cycles; nothing here detects them.

mod error;
mod graph;

pub use crate::error::{NavigationError, NavigationErrorExt};
pub use crate::graph::NavigationGraph;
