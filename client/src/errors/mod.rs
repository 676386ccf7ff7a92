//! Errors surfaced by the client.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

/// Client-side error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The addressed record does not exist (anymore)
    NotFound(String),
    /// A required field is missing, detected locally or by the server
    Validation(String),
    /// The server answered with another error status
    Server { status: u16, message: String },
    /// The request never completed
    Transport(String),
    /// The response body could not be decoded
    Decode(String),
}

impl ClientError {
    /// Map an error response to a client error.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ClientError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            ClientError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ClientError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ClientError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Error body sent by the record store.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
