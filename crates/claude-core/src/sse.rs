//! Incremental decoder for the `text/event-stream` wire format.
//!
//! The decoder is split in two layers:
//!
//! * [`StreamCursor`] – a pure, line-at-a-time state machine. Feed it one
//!   line (without its terminator) and it either absorbs the line into the
//!   pending event or, on a blank line, hands back the completed [`Event`].
//! * [`EventStreamDecoder`] – owns the byte source, splits chunks into lines
//!   (a line may straddle any number of chunks) and drives the cursor.
//!
//! Only the subset of the format this client needs is interpreted: `event`
//! and `data` fields, `:` comments and the blank-line dispatch boundary.
//! `id`, `retry` and unknown fields are accepted and dropped.
//!
//! ```rust
//! use claude_core::sse::StreamCursor;
//!
//! let mut cursor = StreamCursor::default();
//! assert!(cursor.consume_line("event: completion").is_none());
//! assert!(cursor.consume_line("data: foo").is_none());
//! assert!(cursor.consume_line("data: bar").is_none());
//!
//! let event = cursor.consume_line("").unwrap();
//! assert_eq!(event.name, "completion");
//! assert_eq!(event.data, "foo\nbar");
//! ```
use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;
use thiserror::Error;
use tracing::{debug, trace};

use crate::transport::TransportError;

/// Name given to events whose block carried no `event:` field.
pub const DEFAULT_EVENT_NAME: &str = "message";

/// A single dispatched event.
///
/// `data` is opaque to the decoder; interpreting it is up to whoever
/// consumes the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub data: String,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("read event stream: {0}")]
    Read(#[source] TransportError),

    #[error("event stream line is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Fields of the event currently being accumulated.
#[derive(Debug, Default)]
pub struct StreamCursor {
    name: Option<String>,
    data: String,
    seen_data: bool,
}

impl StreamCursor {
    /// Apply one line to the pending event.
    ///
    /// `line` must not contain its `\n` terminator; a trailing `\r` is
    /// expected to be stripped by the caller already.
    pub fn consume_line(&mut self, line: &str) -> Option<Event> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.name = Some(value.to_owned()),
            "data" => {
                if self.seen_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.seen_data = true;
            }
            other => trace!(field = other, "ignoring event-stream field"),
        }
        None
    }

    /// `true` while some field of an unfinished event has been seen.
    pub fn has_pending(&self) -> bool {
        self.name.is_some() || self.seen_data
    }

    fn dispatch(&mut self) -> Option<Event> {
        let name = self.name.take();
        self.seen_data = false;
        // A lone empty `data:` line leaves nothing to dispatch.
        if self.data.is_empty() {
            return None;
        }

        Some(Event {
            name: name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_EVENT_NAME.to_owned()),
            data: std::mem::take(&mut self.data),
        })
    }
}

/// Pulls [`Event`]s out of a chunked byte stream, one per [`Self::decode`].
///
/// The byte source is dropped as soon as it reports end-of-input or an
/// error. From then on every call to `decode` returns `Ok(None)`.
pub struct EventStreamDecoder<S> {
    inner: Option<S>,
    buffer: Vec<u8>,
    scanned: usize,
    cursor: StreamCursor,
}

impl<S> EventStreamDecoder<S>
where
    S: Stream<Item = Result<Bytes, TransportError>> + Unpin,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner: Some(inner),
            buffer: Vec::with_capacity(4096),
            scanned: 0,
            cursor: StreamCursor::default(),
        }
    }

    /// Decode the next event.
    ///
    /// * `Ok(Some(event))` – one completed event.
    /// * `Ok(None)` – the stream ended cleanly (also on every later call).
    /// * `Err(_)` – the byte source failed or a line was not UTF-8.
    pub async fn decode(&mut self) -> Result<Option<Event>, DecodeError> {
        loop {
            let Some(inner) = self.inner.as_mut() else {
                return Ok(None);
            };

            if let Some(line) = next_line(&mut self.buffer, &mut self.scanned) {
                if is_ignored(&line) {
                    continue;
                }
                let line = match String::from_utf8(line) {
                    Ok(line) => line,
                    Err(err) => {
                        self.finish();
                        return Err(err.into());
                    }
                };
                if let Some(event) = self.cursor.consume_line(&line) {
                    return Ok(Some(event));
                }
                continue;
            }

            match inner.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(source)) => {
                    self.finish();
                    return Err(DecodeError::Read(source));
                }
                None => {
                    if self.cursor.has_pending() || !self.buffer.is_empty() {
                        debug!(
                            trailing_bytes = self.buffer.len(),
                            "discarding unterminated event at end of stream"
                        );
                    }
                    self.finish();
                    return Ok(None);
                }
            }
        }
    }

    /// Adapt the decoder into a [`Stream`] of events. The stream ends after
    /// the first error.
    pub fn into_events(mut self) -> impl Stream<Item = Result<Event, DecodeError>> {
        async_stream::try_stream! {
            while let Some(event) = self.decode().await? {
                yield event;
            }
        }
    }

    /// `true` once the byte source has been released.
    pub fn is_finished(&self) -> bool {
        self.inner.is_none()
    }

    fn finish(&mut self) {
        self.inner = None;
        self.buffer = Vec::new();
        self.scanned = 0;
        self.cursor = StreamCursor::default();
    }
}

/// Comments and fields other than `event` and `data` have no effect on the
/// cursor, so they are dropped before any UTF-8 validation.
fn is_ignored(line: &[u8]) -> bool {
    if line.is_empty() {
        return false;
    }
    if line[0] == b':' {
        return true;
    }
    let field = line.split(|&b| b == b':').next().unwrap_or_default();
    if field != b"event" && field != b"data" {
        trace!(field = %String::from_utf8_lossy(field), "ignoring event-stream field");
        return true;
    }
    false
}

/// Split the next `\n`-terminated line off the front of `buffer`, without
/// its terminator and an optional preceding `\r`.
///
/// `scanned` remembers how much of the buffer is known to hold no `\n`, so a
/// long line arriving in many small chunks is scanned only once.
fn next_line(buffer: &mut Vec<u8>, scanned: &mut usize) -> Option<Vec<u8>> {
    let Some(offset) = buffer[*scanned..].iter().position(|&b| b == b'\n') else {
        *scanned = buffer.len();
        return None;
    };

    let end = *scanned + offset;
    let mut line: Vec<u8> = buffer.drain(..=end).collect();
    *scanned = 0;

    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Some(line)
}
