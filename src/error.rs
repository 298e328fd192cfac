// Error types for the sxcu client.

use thiserror::Error;

use crate::status::ErrorKind;

/// Errors that can occur when talking to sxcu.net.
#[derive(Error, Debug)]
pub enum SxcuError {
    /// The service answered with a status other than 200.
    ///
    /// `message` is the text the server sent, or the documented meaning of
    /// `status` when the server sent none.
    #[error("{message}")]
    RemoteService {
        status: u16,
        code: Option<i64>,
        kind: Option<ErrorKind>,
        message: String,
    },

    /// The endpoint description could not be read or lacks required fields.
    #[error("invalid endpoint description: {0}")]
    Configuration(String),

    /// Neither value of a required pair of inputs was supplied.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// Network, DNS or TLS failure below the HTTP layer.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading a file or stream to upload failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A successful response carried a body that is not JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl SxcuError {
    /// HTTP status code for errors reported by the service.
    pub fn status(&self) -> Option<u16> {
        match self {
            SxcuError::RemoteService { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for sxcu operations.
pub type Result<T> = std::result::Result<T, SxcuError>;
