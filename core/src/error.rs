//! Error types for the spy cat API client.
//!
//! # Design
//! Every non-2xx response lands in `Http` with the raw status and body; the
//! body doubles as the error payload the normalizer turns into a display
//! string. A request that never got a response is `Transport` and carries
//! no payload.

use serde_json::Value;
use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `SpyCatClient` parse methods and controller dispatch.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not produce a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The backend's error payload, if this error carries one.
    ///
    /// JSON bodies are returned parsed; any other non-blank body is returned
    /// as a JSON string so the normalizer still sees the text.
    pub fn payload(&self) -> Option<Value> {
        match self {
            ApiError::Http { body, .. } => {
                if body.trim().is_empty() {
                    return None;
                }
                Some(
                    serde_json::from_str(body)
                        .unwrap_or_else(|_| Value::String(body.clone())),
                )
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
