use pforge_event_bus::EventBusError;
use pforge_kernel::gateway::GatewayError;
use pforge_navigation::NavigationError;
use pforge_resolver::ResolverError;
use std::borrow::Cow;

#[pforge_derive::pforge_error]
pub enum SessionError {
    #[error("Session validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("No active screen{}", format_context(.context))]
    NoActiveScreen { context: Option<Cow<'static, str>> },

    #[error("Resolution failed{}: {source}", format_context(.context))]
    Resolver { source: ResolverError, context: Option<Cow<'static, str>> },

    #[error("Navigation edit failed{}: {source}", format_context(.context))]
    Navigation { source: NavigationError, context: Option<Cow<'static, str>> },

    #[error("Gateway error{}: {source}", format_context(.context))]
    Gateway { source: GatewayError, context: Option<Cow<'static, str>> },

    #[error("Event bus error{}: {source}", format_context(.context))]
    Events { source: EventBusError, context: Option<Cow<'static, str>> },

    #[error("Internal session error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
