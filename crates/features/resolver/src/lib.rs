//! # Config Resolution
//!
//! Computes the effective configuration of a screen for a client by layering, lowest
//! precedence first:
//!
//! 1. the registry defaults of the screen,
//! 2. the saved override (minus palette-owned color keys on ordinary screens),
//! 3. the client's palette colors (or, on a brand-owning screen, the brand itself),
//! 4. unsaved session edits.
//!
//! [`inherit`] is the weaker render-time companion: it only fills style keys that are
//! still empty.

mod error;
mod events;
mod inheritance;
mod resolved;
mod resolver;

pub use crate::error::{ResolverError, ResolverErrorExt};
pub use crate::events::BrandChanged;
pub use crate::inheritance::{ROLE_KEYS, inherit};
pub use crate::resolved::{Layer, ResolvedConfig};
pub use crate::resolver::{ConfigResolver, SaveOutcome};
