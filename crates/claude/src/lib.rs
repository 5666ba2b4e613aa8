//! # `claude` – stream a text completion to your terminal
//!
//! The binary sends one prompt to the Anthropic text-completions endpoint and
//! prints the answer token by token as it arrives. This crate holds the
//! pieces the binary is made of and re-exports the workspace crates:
//!
//! | Crate                  | What it provides                                                          |
//! |------------------------|---------------------------------------------------------------------------|
//! | **`claude-core`**      | Event-stream decoder, transport and credential seams, errors, model ids  |
//! | **`claude-prompt`**    | Human/Assistant turn formatting                                           |
//! | **`claude-anthropic`** | reqwest transport, request/response types, event dispatcher, netrc lookup |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use claude::{
//!     anthropic::{AnthropicAdapterBuilder, Dispatcher, api_v1::{CompletionOptions, CompletionRequest}},
//!     model::{AnthropicModel, Model},
//!     session::StreamingSession,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> claude::error::Result<()> {
//!     let adapter = AnthropicAdapterBuilder::new()
//!         .with_credentials(claude::anthropic::credentials::EnvCredentials::anthropic())
//!         .build()?;
//!     let options = CompletionOptions::new(Model::Anthropic(AnthropicModel::Claude2));
//!     let request = CompletionRequest::build("Why is the sky blue?", &options)?;
//!
//!     let dispatcher = Dispatcher::new(std::io::stdout(), std::io::stderr());
//!     StreamingSession::new(adapter, dispatcher).run(&request).await?;
//!     Ok(())
//! }
//! ```
pub mod cli;
pub mod observability;
pub mod session;

pub use claude_anthropic as anthropic;
pub use claude_core::*;
pub use claude_prompt as prompt;
