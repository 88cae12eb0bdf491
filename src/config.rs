//! Client configuration and credentials.
//!
//! Credentials are usually kept in a small TOML secrets file:
//!
//! ```toml
//! api_key = "UXKCGDSYGUUEVQJSYDZH"
//! api_secret = "yzJe2eE7XV-3eY576dyRZ6wXyAbndh6LUrCZ8KN|"
//! ```

use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;
use veil::Redact;

/// API key and secret issued by Podcast Index.
#[derive(Clone, Default, Deserialize, Redact, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Credentials {
    /// API key, sent verbatim in the `X-Auth-Key` header.
    pub api_key: String,

    /// API secret. Never sent; only used to sign requests.
    #[redact]
    pub api_secret: String,
}

impl Credentials {
    /// Upper bound on the size of a secrets file.
    const MAX_FILE_SIZE: u64 = 1024;

    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Loads credentials from a TOML secrets file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if:
    /// - the file cannot be read or is larger than 1 KiB
    /// - the file is not valid TOML
    /// - `api_key` or `api_secret` is missing or empty
    pub fn from_file(secrets_file: impl AsRef<Path>) -> io::Result<Self> {
        let secrets_file = secrets_file.as_ref();

        // Prevent out-of-memory condition: secrets file should be small.
        let file_size = fs::metadata(secrets_file)?.len();
        if file_size > Self::MAX_FILE_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is too large", secrets_file.display()),
            ));
        }

        let contents = fs::read_to_string(secrets_file)?;
        contents.parse().map_err(|e: io::Error| {
            io::Error::new(
                e.kind(),
                format!("{} format is invalid: {e}", secrets_file.display()),
            )
        })
    }
}

impl std::str::FromStr for Credentials {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let credentials: Self =
            toml::from_str(s).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if credentials.api_key.is_empty() || credentials.api_secret.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "api_key and api_secret must not be empty",
            ));
        }

        Ok(credentials)
    }
}

/// Immutable connection configuration of a client.
#[derive(Clone, Redact, PartialEq, Eq)]
pub struct Config {
    /// Identifies the system or product making requests, for example
    /// `SuperPodcastPlayer/1.3`.
    pub user_agent: String,

    /// API key and secret.
    #[redact]
    pub credentials: Credentials,

    /// Base URL that endpoint paths are joined onto. Override it to go
    /// through a proxy or to test against a local server.
    pub base_url: Url,

    /// Upper bound on the duration of a single request, from connecting
    /// until the response body has been read. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    /// The canonical hosted API.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.podcastindex.org/api/1.0/";

    /// Default bound on the duration of a single request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// The default base URL as a [`Url`].
    ///
    /// # Panics
    ///
    /// Will panic if the URL is invalid.
    #[must_use]
    pub fn default_base_url() -> Url {
        Url::parse(Self::DEFAULT_BASE_URL).expect("invalid default base URL")
    }

    /// The default `User-Agent`: this crate's name and version.
    #[must_use]
    pub fn default_user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Creates a configuration for the hosted API with the default user
    /// agent and timeout.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        let user_agent = Self::default_user_agent();
        trace!("user agent: {user_agent}");

        Self {
            user_agent,
            credentials,
            base_url: Self::default_base_url(),
            timeout: Some(Self::DEFAULT_TIMEOUT),
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
