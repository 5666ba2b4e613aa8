//! Credential lookup seam.
//!
//! A [`CredentialResolver`] maps an API hostname to the key that
//! authenticates against it. Concrete resolvers (environment, `~/.netrc`)
//! live in the provider crate; [`ChainedCredentials`] composes them.
use std::{fmt, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no credentials for {host}")]
    NotFound { host: String },

    #[error("cannot locate a home directory to read .netrc from")]
    NoHomeDirectory,

    #[error("netrc: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("netrc: {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// An API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

pub trait CredentialResolver: Send + Sync {
    fn lookup(&self, host: &str) -> Result<ApiKey, CredentialError>;
}

/// Tries each resolver in order.
///
/// A `NotFound` from one resolver falls through to the next; any other
/// error stops the chain.
#[derive(Default)]
pub struct ChainedCredentials {
    resolvers: Vec<Box<dyn CredentialResolver>>,
}

impl ChainedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl CredentialResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }
}

impl CredentialResolver for ChainedCredentials {
    fn lookup(&self, host: &str) -> Result<ApiKey, CredentialError> {
        let mut last = CredentialError::NotFound {
            host: host.to_owned(),
        };
        for resolver in &self.resolvers {
            match resolver.lookup(host) {
                Ok(key) => return Ok(key),
                Err(CredentialError::NotFound { .. }) => {}
                Err(err) => {
                    last = err;
                    break;
                }
            }
        }
        Err(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    impl CredentialResolver for Fixed {
        fn lookup(&self, host: &str) -> Result<ApiKey, CredentialError> {
            self.0.map(ApiKey::new).ok_or(CredentialError::NotFound {
                host: host.to_owned(),
            })
        }
    }

    struct Broken;

    impl CredentialResolver for Broken {
        fn lookup(&self, _host: &str) -> Result<ApiKey, CredentialError> {
            Err(CredentialError::NoHomeDirectory)
        }
    }

    #[test]
    fn first_match_wins() {
        let chain = ChainedCredentials::new()
            .with(Fixed(None))
            .with(Fixed(Some("second")))
            .with(Fixed(Some("third")));
        assert_eq!(chain.lookup("api.example.com").unwrap().expose(), "second");
    }

    #[test]
    fn empty_chain_reports_not_found() {
        let err = ChainedCredentials::new().lookup("api.example.com").unwrap_err();
        assert_eq!(err.to_string(), "no credentials for api.example.com");
    }

    #[test]
    fn hard_errors_stop_the_chain() {
        let chain = ChainedCredentials::new()
            .with(Broken)
            .with(Fixed(Some("unreachable")));
        assert!(matches!(
            chain.lookup("api.example.com"),
            Err(CredentialError::NoHomeDirectory)
        ));
    }

    #[test]
    fn debug_hides_the_key() {
        assert_eq!(format!("{:?}", ApiKey::new("sk-secret")), "ApiKey(***)");
    }
}
