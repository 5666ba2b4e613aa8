use std::{future::Future, pin::Pin, time::Duration};

use claude_core::transport::{ResponseBody, Transport, TransportError};
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tracing::debug;

use crate::{api_v1::API_KEY_HEADER, error::AnthropicError};

/// Minimal reqwest-backed [`Transport`].
///
/// * One `POST` per call; the body is streamed back chunk by chunk.
/// * Only a connect timeout is configured. A streaming body may legitimately
///   stay open for as long as the model keeps generating.
/// * Shares a single `reqwest::Client`, so cloning `AnthropicClient` is cheap.
#[derive(Clone, Debug)]
pub struct AnthropicClient {
    http: HttpClient,
}

impl AnthropicClient {
    /// Convenience constructor building a default `reqwest` client:
    /// 30 s connect timeout, Rustls TLS.
    pub fn new() -> Result<Self, AnthropicError> {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::with_http(http))
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(http: HttpClient) -> Self {
        Self { http }
    }
}

impl Transport for AnthropicClient {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'static str, String)],
        body: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseBody, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let headers = header_map(headers)?;

            let resp = self
                .http
                .post(url)
                .headers(headers)
                .body(body)
                .send()
                .await
                .map_err(AnthropicError::from)?;

            let status = resp.status();
            debug!(%status, "response headers received");

            let stream = resp
                .bytes_stream()
                .map(|chunk| chunk.map_err(|err| TransportError::from(AnthropicError::from(err))));

            Ok(ResponseBody::new(status.as_u16(), Box::pin(stream)))
        })
    }
}

fn header_map(headers: &[(&'static str, String)]) -> Result<HeaderMap, AnthropicError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let mut value = HeaderValue::from_str(value)?;
        if *name == API_KEY_HEADER {
            value.set_sensitive(true);
        }
        map.insert(HeaderName::from_bytes(name.as_bytes())?, value);
    }
    Ok(map)
}
