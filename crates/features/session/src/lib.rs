//! # Editing Sessions
//!
//! An [`EditorSession`] is one operator editing one client's prototype. Unsaved edits
//! of each dirty screen live in a bounded cache and are replayed over the saved
//! override on every activation. Pending edits of the outgoing screen are flushed on
//! every switch, and a palette change drops the whole cache.

mod error;
mod session;

pub use crate::error::{SessionError, SessionErrorExt};
pub use crate::session::EditorSession;
