//! HTTP client for the Podcast Index API.
//!
//! Thin wrapper around `reqwest::Client` that adds:
//! * Consistent timeouts and connection reuse
//! * Per-request authentication headers
//!
//! There is no rate limiting or retrying here: every call
//! performs at most one network attempt.
//!
//! # Example
//!
//! ```ignore
//! use podcastindex::http::Client;
//!
//! let client = Client::new(&config)?;
//! let request = client.get(url)?;
//! let response = client.execute(request).await?;
//! ```

use std::time::Duration;

use reqwest::{Method, Url};

use crate::{auth::AuthHeaders, config::Config, error::Result};

/// HTTP client that signs every request it builds.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    /// Underlying client, possibly supplied by the caller.
    pub inner: reqwest::Client,

    /// Configuration used to sign requests.
    config: Config,
}

impl Client {
    /// TCP keepalive interval of pooled connections.
    const KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a new client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> Result<Self> {
        let mut http_client = reqwest::Client::builder().tcp_keepalive(Self::KEEPALIVE_TIMEOUT);

        if let Some(timeout) = config.timeout {
            http_client = http_client.timeout(timeout);
        }

        Ok(Self::with_client(config, http_client.build()?))
    }

    /// Creates a new client on top of a caller-supplied `reqwest::Client`,
    /// for custom TLS, proxy or timeout settings.
    ///
    /// The configured timeout is still applied per request.
    #[must_use]
    pub fn with_client(config: &Config, inner: reqwest::Client) -> Self {
        Self {
            inner,
            config: config.clone(),
        }
    }

    /// Builds a signed request with the specified method and URL.
    ///
    /// The request is signed for the current time, so it should be executed
    /// right away.
    ///
    /// # Errors
    ///
    /// Returns error if the user agent or API key are not valid header
    /// values.
    pub fn request(&self, method: Method, url: Url) -> Result<reqwest::Request> {
        let mut request = reqwest::Request::new(method, url);

        AuthHeaders::now(&self.config.user_agent, &self.config.credentials)
            .apply(request.headers_mut())?;

        if let Some(timeout) = self.config.timeout {
            *request.timeout_mut() = Some(timeout);
        }

        Ok(request)
    }

    /// Builds a signed GET request.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be signed.
    pub fn get(&self, url: Url) -> Result<reqwest::Request> {
        self.request(Method::GET, url)
    }

    /// Executes a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Execution`](crate::error::Error::Execution) if the
    /// connection fails or the configured timeout elapses before the
    /// response headers arrive.
    pub async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        self.inner.execute(request).await.map_err(Into::into)
    }
}
