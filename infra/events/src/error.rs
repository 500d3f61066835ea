use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[pforge_derive::pforge_error]
pub enum EventBusError {
    /// A stored sender could not be downcast to the requested event type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
