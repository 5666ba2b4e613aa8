//! One request, one streamed response.
//!
//! A [`StreamingSession`] submits a single [`CompletionRequest`], decodes the
//! response body into events and hands each event to its [`Dispatcher`]
//! before asking for the next one.
use std::io::Write;

use claude_anthropic::{
    AnthropicAdapter, DispatchSummary, Dispatcher, api_v1::CompletionRequest,
};
use claude_core::{
    error::{ClaudeError, Result},
    sse::EventStreamDecoder,
};
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    RequestSent,
    Streaming,
    Completed,
    Failed,
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// HTTP status of the response the events were decoded from.
    pub status: u16,
    pub dispatch: DispatchSummary,
}

pub struct StreamingSession<O, E> {
    adapter: AnthropicAdapter,
    dispatcher: Dispatcher<O, E>,
    state: SessionState,
}

impl<O: Write, E: Write> StreamingSession<O, E> {
    pub fn new(adapter: AnthropicAdapter, dispatcher: Dispatcher<O, E>) -> Self {
        Self {
            adapter,
            dispatcher,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn into_dispatcher(self) -> Dispatcher<O, E> {
        self.dispatcher
    }

    /// Send `request` and render every event of the response.
    ///
    /// Returns once the stream ends cleanly, or with the first fatal error.
    /// Errors reported by the server inside the stream are rendered and do
    /// not end the session. A session runs at most once.
    #[instrument(name = "session", skip_all, fields(model = %request.model))]
    pub async fn run(&mut self, request: &CompletionRequest) -> Result<SessionSummary> {
        if self.state != SessionState::Idle {
            return Err(ClaudeError::SessionReused);
        }

        let outcome = self.stream(request).await;
        self.state = match &outcome {
            Ok(_) => SessionState::Completed,
            Err(err) => {
                debug!(state = ?self.state, error = %err, "session failed");
                SessionState::Failed
            }
        };
        outcome
    }

    async fn stream(&mut self, request: &CompletionRequest) -> Result<SessionSummary> {
        self.state = SessionState::RequestSent;
        let body = self.adapter.open_stream(request).await?;

        let status = body.status();
        if !body.is_success() {
            warn!(status, "server answered with a non-success status");
        }

        self.state = SessionState::Streaming;
        let mut decoder = EventStreamDecoder::new(body.into_stream());
        while let Some(event) = decoder.decode().await? {
            self.dispatcher.dispatch(&event)?;
        }
        self.dispatcher.finish()?;

        let dispatch = self.dispatcher.summary();
        debug!(
            status,
            tokens = dispatch.tokens,
            upstream_errors = dispatch.upstream_errors,
            ignored = dispatch.ignored,
            "stream complete"
        );
        Ok(SessionSummary { status, dispatch })
    }
}
