//! Wire protocol of the Podcast Index API.
//!
//! This module contains the JSON shapes of API responses and the request
//! types of its endpoints:
//!
//! # Submodules
//!
//! * [`codec`] - tolerant decoding helpers shared by all entities
//! * [`endpoints`] - request types and response envelopes
//! * [`episode`] - wire format of episodes and their nested entities
//! * [`podcast`] - wire format of feeds
//! * [`query`] - query parameter encoding
//!
//! Domain types such as [`Podcast`](crate::podcast::Podcast) implement
//! `Serialize` and `Deserialize` through the wire types defined here, so
//! that `serde_json` can be used on them directly:
//!
//! ```ignore
//! let podcast: Podcast = serde_json::from_str(json)?;
//! let json = serde_json::to_string(&podcast)?;
//! ```

pub mod codec;
pub mod endpoints;
pub mod episode;
pub mod podcast;
pub mod query;

pub use endpoints::Endpoint;
pub use query::Query;

use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Decodes a response body, logging what was received.
///
/// `origin` names the endpoint in log lines. Decoded values are logged at
/// trace level. When decoding fails, a body that is still valid JSON is
/// dumped at trace level, and a body that is not JSON at all is reported
/// as an error.
///
/// # Errors
///
/// Will return `Err` if the body is not JSON, does not have the shape of
/// `T`, or holds a field value that does not convert.
pub fn json<T>(body: &[u8], origin: &str) -> serde_json::Result<T>
where
    T: DeserializeOwned + Debug,
{
    match serde_json::from_slice(body) {
        Ok(result) => {
            trace!("{origin}: {result:#?}");
            Ok(result)
        }
        Err(e) => {
            if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
                debug!("{origin}: failed decoding response ({e})");
                trace!("{origin}: {json:#?}");
            } else {
                error!("{origin}: failed parsing response ({e})");
                trace!("{}", String::from_utf8_lossy(body));
            }
            Err(e)
        }
    }
}
