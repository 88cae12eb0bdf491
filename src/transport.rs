//! Transport for the Podcast Index API.
//!
//! Joins endpoint paths onto the configured base URL, signs and executes
//! GET requests, and turns responses into decoded payloads or errors:
//!
//! | Status       | Outcome                                     |
//! |--------------|---------------------------------------------|
//! | 200, 302     | body decoded, or [`Error::Decode`]          |
//! | 401          | [`Error::Authentication`]                   |
//! | 400          | [`Error::MalformedRequest`]                 |
//! | anything else| [`Error::Server`] with body, or [`Error::Read`] |
//!
//! Each call makes exactly one attempt. Failures of the exchange itself
//! (DNS, connection, TLS, timeout) are [`Error::Execution`].
//!
//! # Example
//!
//! ```ignore
//! use podcastindex::{protocol::endpoints::podcasts, transport::Transport};
//!
//! let transport = Transport::new(&config)?;
//! let response = transport.request(&podcasts::ByFeedId { id: 920_666.into() }).await?;
//! ```

use std::fmt::Debug;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
    http,
    protocol::{self, Endpoint, Query},
};

/// Signed access to the API below a base URL.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Transport {
    http_client: http::Client,
    base_url: Url,
}

impl Transport {
    /// Creates a transport with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http_client: http::Client::new(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates a transport on top of an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(config: &Config, client: reqwest::Client) -> Self {
        Self {
            http_client: http::Client::with_client(config, client),
            base_url: config.base_url.clone(),
        }
    }

    /// Returns the base URL that endpoints are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the full URL of an endpoint with its query.
    ///
    /// Leading, trailing and doubled slashes in `endpoint` are ignored, as
    /// is a trailing slash on the base URL.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the base URL cannot have path segments, for
    /// example `mailto:` URLs.
    pub fn url(&self, endpoint: &str, query: &Query) -> Result<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(endpoint.split('/').filter(|segment| !segment.is_empty()));

        if query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&query.encode()));
        }

        Ok(url)
    }

    /// Requests an endpoint and decodes its response envelope.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn request<E>(&self, endpoint: &E) -> Result<E::Response>
    where
        E: Endpoint,
    {
        self.get(E::PATH, &endpoint.query()).await
    }

    /// Issues a GET request and decodes the body as `T`.
    ///
    /// The request is signed right before it is sent.
    ///
    /// # Errors
    ///
    /// Will return `Err` if:
    /// - the URL cannot be built or the request cannot be signed
    /// - the exchange fails or times out
    /// - the response has a non-success status
    /// - the body of a successful response does not decode
    pub async fn get<T>(&self, endpoint: &str, query: &Query) -> Result<T>
    where
        T: DeserializeOwned + Debug,
    {
        let url = self.url(endpoint, query)?;
        debug!("GET {url}");

        let request = self.http_client.get(url.clone())?;
        let response = self.http_client.execute(request).await?;

        let status = response.status();
        trace!("{endpoint}: {status}");

        match status {
            StatusCode::OK | StatusCode::FOUND => {
                let url = response.url().clone();
                let body = response.bytes().await?;
                protocol::json(&body, endpoint).map_err(|source| Error::Decode { url, source })
            }

            StatusCode::UNAUTHORIZED => {
                drain(response).await;
                Err(Error::Authentication { url })
            }

            StatusCode::BAD_REQUEST => {
                drain(response).await;
                Err(Error::MalformedRequest {
                    url,
                    status: status.as_u16(),
                })
            }

            _ => match response.text().await {
                Ok(body) => Err(Error::Server {
                    url,
                    status: status.as_u16(),
                    body,
                }),
                Err(source) => Err(Error::Read {
                    url,
                    status: status.as_u16(),
                    source,
                }),
            },
        }
    }
}

/// Reads and discards a response body so the connection can be reused.
async fn drain(response: reqwest::Response) {
    if let Err(e) = response.bytes().await {
        trace!("discarding unreadable response body: {e}");
    }
}
