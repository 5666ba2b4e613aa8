//! The HTTP seam between a streaming session and the network.
//!
//! A [`Transport`] performs exactly one `POST` and hands back the response
//! body as a stream of byte chunks. The body is returned regardless of the
//! HTTP status: callers decide what a non-success status means.
//!
//! The method returns a boxed future so the trait stays object-safe without
//! pulling in `async_trait`.
use std::{future::Future, pin::Pin};

use bytes::Bytes;
use futures_core::Stream;

/// Boxed error produced by a transport implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Response body as handed to the event-stream decoder.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Header list for a request.
pub type Headers = Vec<(&'static str, String)>;

pub trait Transport: Send + Sync {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'static str, String)],
        body: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseBody, TransportError>> + Send + 'a>>;
}

/// A readable response: status line plus the streaming body.
pub struct ResponseBody {
    status: u16,
    stream: ByteStream,
}

impl ResponseBody {
    pub fn new(status: u16, stream: ByteStream) -> Self {
        Self { status, stream }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_stream(self) -> ByteStream {
        self.stream
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseBody")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
