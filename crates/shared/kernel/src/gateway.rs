//! The persistence contract the engine consumes.
//!
//! Implementations are opaque and may be network backed; the engine performs no
//! retries, so every failure surfaces immediately as a [`GatewayError`].

use pforge_domain::ConfigMap;
use pforge_domain::brand::{BrandPatch, ClientBrandConfig};
use pforge_domain::screen::ApproachScreen;
use std::borrow::Cow;
use std::future::Future;

#[pforge_derive::pforge_error]
pub enum GatewayError {
    #[error("Gateway unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Already exists{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Storage I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Document encoding error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal gateway error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl GatewayError {
    pub fn not_found(what: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: what.into(), context: None }
    }

    pub fn unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unavailable { message: message.into(), context: None }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Screen override and brand storage.
///
/// `load` returns an empty map when the pair has never been saved. `save` replaces
/// the stored settings for the pair; concurrent saves are last-write-wins.
pub trait ConfigGateway: Send + Sync + 'static {
    fn load(
        &self,
        client_id: &str,
        screen_id: &str,
    ) -> impl Future<Output = Result<ConfigMap, GatewayError>> + Send;

    fn save(
        &self,
        client_id: &str,
        screen_id: &str,
        settings: ConfigMap,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn load_brand(
        &self,
        client_id: &str,
    ) -> impl Future<Output = Result<ClientBrandConfig, GatewayError>> + Send;

    /// Applies `patch` and returns the brand as stored afterwards.
    fn update_brand(
        &self,
        client_id: &str,
        patch: BrandPatch,
    ) -> impl Future<Output = Result<ClientBrandConfig, GatewayError>> + Send;
}

/// Approach membership lookup feeding navigation target pickers.
pub trait ApproachDirectory: Send + Sync + 'static {
    /// Screens of `approach_id` in `order_index` order. Unknown approaches yield an empty list.
    fn approach_screens(
        &self,
        approach_id: &str,
    ) -> impl Future<Output = Result<Vec<ApproachScreen>, GatewayError>> + Send;
}
