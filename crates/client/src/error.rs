//! Client Error Types

use thiserror::Error;

/// Client Result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error, split along the console's recovery taxonomy: transport
/// failures carry no response, server-reported failures carry the
/// structured body, and 401 is the one session-fatal case.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No response from server: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Session expired or missing")]
    Unauthorized,

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Domain(#[from] queuedeck_core::domain::DomainError),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
