use crate::gateway::GatewayError;

const MAX_KEY_LEN: usize = 64;

/// Kind of identifier being checked; shows up in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Client,
    Screen,
    Approach,
}

impl KeyKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client id",
            Self::Screen => "screen id",
            Self::Approach => "approach id",
        }
    }
}

/// Utilities for validating identifiers before they become storage keys or paths.
#[derive(Debug)]
pub struct KeyGuard;

impl KeyGuard {
    /// Accepts `[A-Za-z0-9_-]{1,64}`. Anything else (including path separators and dots)
    /// is rejected so an id can never escape its storage namespace.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidKey`] describing the offending id.
    pub fn verify(kind: KeyKind, id: &str) -> Result<&str, GatewayError> {
        let reason = if id.is_empty() {
            Some("must not be empty")
        } else if id.len() > MAX_KEY_LEN {
            Some("is too long")
        } else if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            Some("contains unsupported characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GatewayError::InvalidKey {
                message: format!("{} '{id}' {reason}", kind.as_str()).into(),
                context: None,
            }),
            None => Ok(id),
        }
    }
}
