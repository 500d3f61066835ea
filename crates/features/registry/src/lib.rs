//! # Screen Registry
//!
//! Process-wide catalog of screen definitions, built once during bootstrap and
//! passed by handle to everything that resolves or renders screens.
//!
//! * [`ScreenRegistry`] stores definitions in registration order; duplicates replace
//!   the previous entry and are reported, never rejected.
//! * [`ScreenRenderer`] and [`ConfigEditor`] are the typed capability handles a
//!   definition carries.
//! * [`DependencyValidator`] checks that declared dependencies are registered.

mod component;
mod definition;
mod error;
mod registry;
mod validator;

pub use crate::component::{ConfigEditor, EditorField, FieldKind, ScreenComponent, ScreenRenderer};
pub use crate::definition::{ScreenDefinition, ScreenSpec, ScreenSpecBuilder};
pub use crate::error::{RegistryError, RegistryErrorExt};
pub use crate::registry::{Registration, ScreenRegistry};
pub use crate::validator::{DependencyReport, DependencyValidator};
