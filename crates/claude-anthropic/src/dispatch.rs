//! Interprets decoded events and renders their effect.
//!
//! `completion` events become tokens on the output sink, `error` events
//! become one diagnostic line on the error sink, everything else is
//! ignored. Only a payload that fails to parse is fatal.
use std::io::Write;

use claude_core::{
    error::{ClaudeError, Result},
    sse::Event,
};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::api_v1::{COMPLETION_EVENT, CompletionMessage, ERROR_EVENT, ErrorEnvelope};

/// What a single [`Dispatcher::dispatch`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Token,
    UpstreamError,
    Ignored,
}

/// Counters accumulated over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub tokens: usize,
    pub upstream_errors: usize,
    pub ignored: usize,
}

pub struct Dispatcher<O, E> {
    out: O,
    err: E,
    first_token: bool,
    summary: DispatchSummary,
}

impl<O: Write, E: Write> Dispatcher<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            first_token: true,
            summary: DispatchSummary::default(),
        }
    }

    pub fn dispatch(&mut self, event: &Event) -> Result<Dispatched> {
        match event.name.as_str() {
            COMPLETION_EVENT => {
                let msg: CompletionMessage = parse(event)?;
                let mut token = msg.completion.as_str();
                // The first token conventionally carries a separating space.
                if self.first_token {
                    token = token.strip_prefix(' ').unwrap_or(token);
                    self.first_token = false;
                }

                self.out.write_all(token.as_bytes())?;
                self.out.flush()?;
                self.summary.tokens += 1;

                if let Some(reason) = &msg.stop_reason {
                    debug!(stop_reason = %reason, model = ?msg.model, "completion stopped");
                }
                Ok(Dispatched::Token)
            }
            ERROR_EVENT => {
                let ErrorEnvelope { error } = parse(event)?;
                writeln!(self.err, "Error code={}: {:?}", error.kind, error.message)?;
                self.err.flush()?;
                self.summary.upstream_errors += 1;
                Ok(Dispatched::UpstreamError)
            }
            other => {
                trace!(event = other, "ignoring event");
                self.summary.ignored += 1;
                Ok(Dispatched::Ignored)
            }
        }
    }

    /// Terminate the rendered output with a single newline.
    pub fn finish(&mut self) -> Result<()> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn summary(&self) -> DispatchSummary {
        self.summary
    }

    pub fn into_sinks(self) -> (O, E) {
        (self.out, self.err)
    }
}

fn parse<T: DeserializeOwned>(event: &Event) -> Result<T> {
    serde_json::from_str(&event.data).map_err(|source| ClaudeError::Protocol {
        event: event.name.clone(),
        data: event.data.clone(),
        source,
    })
}
