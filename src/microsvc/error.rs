//! Error types for microsvc command handlers.

use std::error::Error;
use std::fmt;

use crate::edit::EditError;

/// Error type for command handler operations.
#[derive(Debug)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    DecodeFailed(String),
    /// Guard rejected the command (input shape check failed).
    GuardRejected(String),
    /// The edit submission failed.
    Edit(EditError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::GuardRejected(name) => {
                write!(f, "guard rejected command: {}", name)
            }
            HandlerError::Edit(e) => write!(f, "{}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Edit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EditError> for HandlerError {
    fn from(err: EditError) -> Self {
        HandlerError::Edit(err)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Edit(e) => e.status_code(),
        }
    }

    /// True when the request must end without a response envelope.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HandlerError::Edit(e) if e.is_fatal())
    }
}
