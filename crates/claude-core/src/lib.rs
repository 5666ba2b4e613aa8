//! Provider-agnostic building blocks of the `claude` streaming client.
//!
//! * [`sse`] – incremental `text/event-stream` decoder.
//! * [`transport`] – the `POST → byte stream` seam.
//! * [`credentials`] – hostname → API key lookup seam.
//! * [`model`] – model identifiers.
//! * [`error`] – the workspace-wide [`ClaudeError`](error::ClaudeError).
pub mod credentials;
pub mod error;
pub mod model;
pub mod sse;
pub mod transport;
