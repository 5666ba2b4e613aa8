//! Concrete [`CredentialResolver`]s: the process environment and `~/.netrc`.
use std::{env, fs, path::PathBuf};

use claude_core::credentials::{ApiKey, CredentialError, CredentialResolver};
use directories::BaseDirs;
use netrc::Netrc;
use tracing::debug;

/// Environment variable consulted by [`EnvCredentials::anthropic`].
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Reads the key from an environment variable, whatever the host.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn anthropic() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl CredentialResolver for EnvCredentials {
    fn lookup(&self, host: &str) -> Result<ApiKey, CredentialError> {
        match env::var(&self.var) {
            Ok(key) if !key.is_empty() => {
                debug!(var = %self.var, "using api key from environment");
                Ok(ApiKey::new(key))
            }
            _ => Err(CredentialError::NotFound {
                host: host.to_owned(),
            }),
        }
    }
}

/// Looks the host up as a `machine` entry of a netrc file and returns its
/// `password`, falling back to the `default` entry.
///
/// The file is read on every lookup; a missing file is an error, not a
/// fall-through.
#[derive(Debug, Clone)]
pub struct NetrcCredentials {
    path: Option<PathBuf>,
}

impl NetrcCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `$HOME/.netrc`. Resolution of the home directory is deferred to
    /// [`CredentialResolver::lookup`].
    pub fn in_home() -> Self {
        Self {
            path: BaseDirs::new().map(|dirs| dirs.home_dir().join(".netrc")),
        }
    }
}

impl CredentialResolver for NetrcCredentials {
    fn lookup(&self, host: &str) -> Result<ApiKey, CredentialError> {
        let path = self.path.as_deref().ok_or(CredentialError::NoHomeDirectory)?;
        let contents = fs::read_to_string(path).map_err(|source| CredentialError::Io {
            path: path.to_owned(),
            source,
        })?;

        let netrc = Netrc::parse(contents.as_bytes()).map_err(|err| match err {
            netrc::Error::Io(source) => CredentialError::Io {
                path: path.to_owned(),
                source,
            },
            netrc::Error::Parse(reason, line) => CredentialError::Malformed {
                path: path.to_owned(),
                reason: format!("line {line}: {reason}"),
            },
        })?;

        let password = netrc
            .hosts
            .iter()
            .find(|(name, _)| name == host)
            .map(|(_, machine)| machine)
            .or(netrc.default.as_ref())
            .and_then(|machine| machine.password.clone())
            .ok_or_else(|| CredentialError::NotFound {
                host: host.to_owned(),
            })?;

        debug!(path = %path.display(), host, "using api key from netrc");
        Ok(ApiKey::new(password))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    const HOST: &str = "api.anthropic.com";

    fn netrc(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn lookup(file: &NamedTempFile) -> Result<ApiKey, CredentialError> {
        NetrcCredentials::new(file.path()).lookup(HOST)
    }

    #[test]
    fn picks_the_matching_machine() {
        let file = netrc(
            "machine example.com login bob password hunter2\n\
             machine api.anthropic.com\n\
             \tlogin me\n\
             \tpassword sk-ant-1\n",
        );
        assert_eq!(lookup(&file).unwrap().expose(), "sk-ant-1");
    }

    #[test]
    fn falls_back_to_default_entry() {
        let file = netrc("machine a.example login a password a\ndefault login x password fallback\n");
        assert_eq!(lookup(&file).unwrap().expose(), "fallback");
    }

    #[test]
    fn missing_machine_is_not_found() {
        let file = netrc("machine elsewhere.example login me password nope\n");
        let err = lookup(&file).unwrap_err();
        assert_eq!(err.to_string(), "no credentials for api.anthropic.com");
    }

    #[test]
    fn machine_without_password_is_not_found() {
        let file = netrc("machine api.anthropic.com login me\n");
        assert!(matches!(
            lookup(&file).unwrap_err(),
            CredentialError::NotFound { .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetrcCredentials::new(dir.path().join("absent"))
            .lookup(HOST)
            .unwrap_err();
        assert!(matches!(err, CredentialError::Io { .. }));
    }

    #[test]
    fn unset_env_var_is_not_found() {
        let err = EnvCredentials::new("CLAUDE_TEST_SURELY_UNSET_VARIABLE")
            .lookup(HOST)
            .unwrap_err();
        assert!(matches!(err, CredentialError::NotFound { .. }));
    }
}
