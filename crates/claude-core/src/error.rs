//! Unified error type exposed by **`claude-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before bubbling them up to the streaming session. Every variant is fatal
//! for the invocation; errors the server reports *inside* the event stream
//! are diagnostics, not `ClaudeError`s.

use thiserror::Error;

use crate::{credentials::CredentialError, sse::DecodeError, transport::TransportError};

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ClaudeError>;

#[derive(Debug, Error)]
pub enum ClaudeError {
    /// Invalid or conflicting invocation options, detected before any
    /// network activity.
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// Building, sending or receiving the HTTP exchange failed. `step` names
    /// the part of the exchange that broke.
    #[error("{step}: {source}")]
    Transport {
        step: &'static str,
        #[source]
        source: TransportError,
    },

    /// Failure while serialising the request body.
    #[error("can't marshal args: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The event stream could not be read or framed.
    #[error("decoding: {0}")]
    Decode(#[from] DecodeError),

    /// An event carried a payload that does not match the expected message
    /// shape for its name.
    #[error("parse {event} event {data:?}: {source}")]
    Protocol {
        event: String,
        data: String,
        #[source]
        source: serde_json::Error,
    },

    /// A streaming session was asked to run a second time.
    #[error("streaming session has already run")]
    SessionReused,

    /// Writing rendered output failed.
    #[error("write output: {0}")]
    Io(#[from] std::io::Error),

    /// Generic forwarding of any backend-specific error that doesn’t fit another
    /// category.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ClaudeError {
    pub fn config(message: impl Into<String>) -> Self {
        ClaudeError::Config(message.into())
    }
}
