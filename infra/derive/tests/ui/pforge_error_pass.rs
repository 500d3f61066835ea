use pforge_derive::pforge_error;
use std::borrow::Cow;

#[pforge_error]
pub enum DemoError {
    #[error("Gateway unavailable{}: {source}", format_context(.context))]
    Unavailable {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
