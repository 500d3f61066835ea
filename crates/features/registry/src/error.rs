use std::borrow::Cow;

#[pforge_derive::pforge_error]
pub enum RegistryError {
    #[error("Screen validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown screen{}: {screen_id}", format_context(.context))]
    UnknownScreen { screen_id: String, context: Option<Cow<'static, str>> },

    #[error("Screen '{screen_id}' depends on unregistered screens{}: {}", format_context(.context), .missing.join(", "))]
    DependencyMissing {
        screen_id: String,
        missing: Vec<String>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
