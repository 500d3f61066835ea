use pforge_registry::RegistryError;
use pforge_session::SessionError;
use std::borrow::Cow;

#[pforge_derive::pforge_error]
pub enum PlatformError {
    #[error("Registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },

    #[error("Session error{}: {source}", format_context(.context))]
    Session { source: SessionError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
