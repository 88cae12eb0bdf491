//! Error handling for the Podcast Index client.
//!
//! Every failure a call can produce is a variant of [`enum@Error`], carrying
//! enough context (request URL, status code, field name) to be acted upon.
//! Nothing is retried or suppressed: errors are wrapped once and returned.
//!
//! # Error Categories
//!
//! Errors are categorized by [`ErrorKind`], which maps to the HTTP status
//! code that caused them where there is one:
//! * Authentication failures (401)
//! * Malformed requests (400)
//! * Other non-success responses (4xx, 5xx)
//! * Decoding failures of successful responses
//! * Failures of the HTTP exchange itself
//! * Unusable configuration
//!
//! # Example
//!
//! ```ignore
//! use podcastindex::error::{Error, ErrorKind};
//!
//! match client.podcast_by_feed_id(920_666.into()).await {
//!     Ok(podcast) => println!("{podcast:?}"),
//!     Err(e) if e.kind() == ErrorKind::Unauthenticated => {
//!         eprintln!("check your API key and secret: {e}");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```

use thiserror::Error;
use url::Url;

/// Standard result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error for conversions that can fail in different ways.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type of the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the credentials (HTTP 401).
    #[error("authentication error when making request to podcast index API ({url}), please verify your API key and API secret values are correct")]
    Authentication {
        /// URL of the rejected request.
        url: Url,
    },

    /// The API rejected the request as structurally invalid (HTTP 400).
    ///
    /// This usually indicates a defect in this client or a change of the
    /// API rather than a caller mistake.
    #[error("podcast index API at {url} returned status code {status}. This usually indicates a malformed request, potentially a bug in this client or an API change")]
    MalformedRequest {
        /// URL of the rejected request.
        url: Url,
        /// HTTP status code.
        status: u16,
    },

    /// The API answered with any other non-success status.
    #[error("podcast index API at {url} returned status code {status} with response: {body}")]
    Server {
        /// URL of the failed request.
        url: Url,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The API answered with a non-success status and its body could not
    /// be read.
    #[error("podcast index API at {url} returned status code {status}, failed to read error response: {source}")]
    Read {
        /// URL of the failed request.
        url: Url,
        /// HTTP status code.
        status: u16,
        /// The underlying transfer failure.
        #[source]
        source: reqwest::Error,
    },

    /// A successful response could not be decoded.
    #[error("failed to decode response from podcast index API ({url}): {source}")]
    Decode {
        /// URL of the response.
        url: Url,
        /// The underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// A single field value could not be converted.
    #[error(transparent)]
    FieldParse(#[from] FieldError),

    /// The HTTP exchange itself failed: DNS, connection, TLS or timeout.
    #[error("failed to execute HTTP request: {source}")]
    Execution {
        /// The underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The client configuration cannot be used to issue requests.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A field value that could not be converted into its domain type.
///
/// Names the field and the raw value as received, so that the error points
/// at the offending piece of a response rather than at the response as a
/// whole.
///
/// # Examples
///
/// ```ignore
/// let err = FieldError::new("URL", ":invalid", podcastindex::link::LinkError::MissingScheme);
/// assert!(err.to_string().starts_with("failed to parse URL ':invalid'"));
/// ```
#[derive(Debug, Error)]
#[error("failed to parse {field} '{value}': {source}")]
pub struct FieldError {
    /// Human-readable name of the field.
    pub field: &'static str,
    /// The raw value that failed to convert.
    pub value: String,
    /// The underlying conversion failure.
    #[source]
    pub source: BoxError,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new<E>(field: &'static str, value: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            field,
            value: value.into(),
            source: source.into(),
        }
    }
}

/// Error categories.
///
/// Each variant maps to the HTTP status code that produced it, if any.
#[expect(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    /// HTTP Mapping: 401 Unauthorized
    #[error("no valid authentication credentials")]
    Unauthenticated,

    /// HTTP Mapping: 400 Bad Request
    #[error("malformed request")]
    MalformedRequest,

    /// HTTP Mapping: any other non-success status
    #[error("server error")]
    Server,

    /// HTTP Mapping: any other non-success status, body unreadable
    #[error("unreadable response")]
    Read,

    /// HTTP Mapping: 200 OK or 302 Found with an undecodable body
    #[error("undecodable response")]
    Decode,

    /// No HTTP mapping: a single value failed to convert
    #[error("invalid field value")]
    FieldParse,

    /// No HTTP mapping: the exchange did not complete
    #[error("request execution failed")]
    Execution,

    /// No HTTP mapping: the request could not be built
    #[error("invalid configuration")]
    Config,
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Unauthenticated,
            Self::MalformedRequest { .. } => ErrorKind::MalformedRequest,
            Self::Server { .. } => ErrorKind::Server,
            Self::Read { .. } => ErrorKind::Read,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::FieldParse(_) => ErrorKind::FieldParse,
            Self::Execution { .. } => ErrorKind::Execution,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns the HTTP status code of the response that caused this error,
    /// if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::MalformedRequest { status, .. }
            | Self::Server { status, .. }
            | Self::Read { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the URL of the request that caused this error, if any.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Authentication { url }
            | Self::MalformedRequest { url, .. }
            | Self::Server { url, .. }
            | Self::Read { url, .. }
            | Self::Decode { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Returns `true` if the exchange was aborted because it timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Execution { source } if source.is_timeout())
    }
}

/// Converts HTTP client errors into execution failures.
///
/// Status errors never reach this conversion: responses are classified
/// by status code before their bodies are touched.
impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Execution { source }
    }
}

/// Converts invalid header values to `Config`.
impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Config(format!("invalid header value: {e}"))
    }
}
