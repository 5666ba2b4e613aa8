use claude_core::error::ClaudeError;
use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};

/// Failures raised inside the reqwest-backed transport and adapter setup.
#[derive(Debug, thiserror::Error)]
pub enum AnthropicError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    #[error("header value is not valid ASCII: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<AnthropicError> for ClaudeError {
    fn from(value: AnthropicError) -> Self {
        match value {
            AnthropicError::InvalidBaseUrl { .. } => ClaudeError::Config(value.to_string()),
            other => ClaudeError::Backend(Box::new(other)),
        }
    }
}
