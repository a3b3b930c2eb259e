//! Error types for every stage of a run, and the code that renders them for users.

mod error_types;
mod pretty_messages;

pub use error_types::{ParseError, RunError, RuntimeError, TokenError};
pub use pretty_messages::pretty_error_message;
