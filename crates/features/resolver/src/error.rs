use pforge_kernel::gateway::GatewayError;
use std::borrow::Cow;

#[pforge_derive::pforge_error]
pub enum ResolverError {
    /// Missing or blank client/screen id.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown screen{}: {screen_id}", format_context(.context))]
    UnknownScreen { screen_id: String, context: Option<Cow<'static, str>> },

    #[error("Gateway error{}: {source}", format_context(.context))]
    Gateway { source: GatewayError, context: Option<Cow<'static, str>> },

    #[error("Internal resolver error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ResolverError {
    pub(crate) fn blank(field: &'static str) -> Self {
        Self::Validation { message: format!("{field} must not be empty").into(), context: None }
    }
}
