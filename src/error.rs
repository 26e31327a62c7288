//! Error types for the document client and the page loader.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Any unsuccessful remote call: a non-2xx status, a transport failure,
    /// or a success body that does not decode into the expected type.
    #[error("{message}")]
    RequestFailed {
        message: String,
        status: Option<StatusCode>,
    },
}

impl ClientError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        ClientError::RequestFailed {
            message: message.into(),
            status: None,
        }
    }

    pub fn from_status(operation: &str, status: StatusCode) -> Self {
        ClientError::RequestFailed {
            message: format!("{}: {}", operation, describe_status(status)),
            status: Some(status),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::RequestFailed { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ClientError::RequestFailed { message, .. } => message,
        }
    }
}

pub(crate) fn describe_status(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// What the page loader hands to the rendering layer when it cannot load a
/// document. The underlying client failure stays reachable through `source`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LoadError {
    pub status: u16,
    pub message: String,
    #[source]
    pub cause: ClientError,
}

impl LoadError {
    pub const STATUS: u16 = 500;
    pub const MESSAGE: &'static str = "Could not load document";

    pub fn new(cause: ClientError) -> Self {
        Self {
            status: Self::STATUS,
            message: Self::MESSAGE.to_string(),
            cause,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
