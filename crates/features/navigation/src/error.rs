use std::borrow::Cow;

#[pforge_derive::pforge_error]
pub enum NavigationError {
    #[error("Navigation validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("No edge for element{}: {element_id}", format_context(.context))]
    UnknownElement { element_id: String, context: Option<Cow<'static, str>> },
}
