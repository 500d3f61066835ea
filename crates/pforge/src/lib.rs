//! Facade crate for pforge.
//! Re-exports the shared and feature crates and owns the bootstrap phase.
//! Keep this crate thin: it composes the engine, it does not implement it.
//!
//! ## Usage
//! - Call [`bootstrap`] once with the loaded [`EngineConfig`](domain::config::EngineConfig).
//! - Build resolvers and editing sessions from the returned [`Platform`] for a gateway.

mod catalog;
mod components;
mod error;
mod platform;

pub use pforge_domain as domain;
pub use pforge_event_bus as events;
pub use pforge_kernel as kernel;

pub use crate::catalog::{CatalogScreen, builtin_screens};
pub use crate::components::{FieldEditor, TemplateRenderer};
pub use crate::error::{PlatformError, PlatformErrorExt};
pub use crate::platform::{Platform, bootstrap, bootstrap_with};

/// Engine feature slices, one per core component.
pub mod features {
    pub use pforge_navigation as navigation;
    pub use pforge_registry as registry;
    pub use pforge_resolver as resolver;
    pub use pforge_session as session;
}
