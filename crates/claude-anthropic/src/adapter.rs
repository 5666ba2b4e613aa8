use std::sync::Arc;

use claude_core::{
    credentials::{ApiKey, CredentialResolver},
    error::{ClaudeError, Result},
    transport::{Headers, ResponseBody, Transport},
};
use reqwest::Url;
use tracing::debug;

use crate::{
    api_v1::{API_KEY_HEADER, API_VERSION, CompletionRequest, VERSION_HEADER},
    client::AnthropicClient,
    error::AnthropicError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Wires a [`Transport`] and a resolved API key into something that can open
/// a completion stream.
///
/// Think of it as the **service locator** for the Anthropic back-end:
///
/// * stores the API key and the base URL,
/// * owns a shareable transport (reqwest by default),
/// * knows the endpoint path and the headers the API expects.
pub struct AnthropicAdapter {
    transport: Arc<dyn Transport>,
    api_key: ApiKey,
    base_url: Url,
}

impl AnthropicAdapter {
    /// `POST {base}/v1/complete`.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/complete", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Headers sent with every completion request.
    pub fn headers(&self) -> Headers {
        vec![
            ("accept", "application/json".to_owned()),
            (VERSION_HEADER, API_VERSION.to_owned()),
            ("content-type", "application/json".to_owned()),
            (API_KEY_HEADER, self.api_key.expose().to_owned()),
        ]
    }

    /// Submit `request` and return the response body, whatever its status.
    ///
    /// # Errors
    ///
    /// * [`ClaudeError::Serialization`] – the body cannot be encoded.
    /// * [`ClaudeError::Transport`] – the request could not be sent.
    pub async fn open_stream(&self, request: &CompletionRequest) -> Result<ResponseBody> {
        let body = request.to_body()?;
        let url = self.endpoint();
        let headers = self.headers();

        debug!(%url, bytes = body.len(), "sending completion request");
        self.transport
            .post(&url, &headers, body)
            .await
            .map_err(|source| ClaudeError::Transport {
                step: "POST",
                source,
            })
    }
}

/// Builder for [`AnthropicAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use claude_anthropic::{AnthropicAdapterBuilder, credentials::NetrcCredentials};
///
/// let backend = AnthropicAdapterBuilder::new()
///     .with_credentials(NetrcCredentials::in_home())
///     .build()
///     .expect("api.anthropic.com must be listed in ~/.netrc");
/// ```
///
/// An explicit key set with [`Self::with_api_key`] wins over the resolver.
#[derive(Default)]
pub struct AnthropicAdapterBuilder {
    api_key: Option<ApiKey>,
    credentials: Option<Box<dyn CredentialResolver>>,
    base_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl AnthropicAdapterBuilder {
    /// Create an *empty* builder. Remember to supply a key or a resolver.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Resolve the key for the base URL's host at [`Self::build`] time.
    pub fn with_credentials(mut self, resolver: impl CredentialResolver + 'static) -> Self {
        self.credentials = Some(Box::new(resolver));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replace the default reqwest transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`ClaudeError::Config`] – the base URL is invalid, or neither a key
    ///   nor a resolver was supplied.
    /// * [`ClaudeError::Credentials`] – the resolver found no key.
    pub fn build(self) -> Result<AnthropicAdapter> {
        let raw_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = parse_base_url(raw_url)?;
        let host = base_url.host_str().unwrap_or_default();

        let api_key = match (self.api_key, self.credentials) {
            (Some(key), _) => key,
            (None, Some(resolver)) => resolver.lookup(host)?,
            (None, None) => {
                return Err(ClaudeError::config(
                    "no api key: supply one or a credential resolver",
                ));
            }
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(AnthropicClient::new()?),
        };

        Ok(AnthropicAdapter {
            transport,
            api_key,
            base_url,
        })
    }
}

fn parse_base_url(raw: &str) -> std::result::Result<Url, AnthropicError> {
    let invalid = |reason: String| AnthropicError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    Ok(url)
}
