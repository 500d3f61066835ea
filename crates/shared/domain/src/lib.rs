//! # Domain Models
//!
//! Pure data types shared by every pforge crate: brand palettes, screen overrides,
//! navigation targets, approach membership and engine settings.
//! Keep it lean: no I/O, networking, or resolution logic, just data and small helpers.

pub mod brand;
pub mod config;
pub mod constants;
pub mod navigation;
pub mod screen;

/// Untyped screen configuration: a flat map of primitives plus the reserved
/// `navigation_config` map and opaque screen-owned lists.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

pub use serde_json::{Value, json};
