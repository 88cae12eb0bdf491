//! Endpoints of the Podcast Index API.
//!
//! Each request type names its path and the envelope its response comes
//! in, and assembles its own query parameters:
//! * [`podcasts`] - feed lookups by id, GUID, iTunes id or URL
//! * [`episodes`] - episodes by feed, single episodes and live items
//! * [`search`] - searches by term, title, person and music term
//! * [`categories`] - the category list
//!
//! # Envelopes
//!
//! Every response wraps its payload:
//!
//! ```json
//! {
//!     "status": "true",
//!     "feed": { ... },
//!     "description": "Found matching feed"
//! }
//! ```
//!
//! The `status` string is not consulted: HTTP status codes alone decide
//! success.

pub mod categories;
pub mod episodes;
pub mod podcasts;
pub mod search;

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Deserialize};
use serde_with::{serde_as, DefaultOnNull};

use super::{codec::found, query::Query};
use crate::{episode::Episode, podcast::Category, podcast::Podcast};

/// An API endpoint.
///
/// # Example
///
/// ```ignore
/// struct ByFeedId { id: FeedId }
///
/// impl Endpoint for ByFeedId {
///     const PATH: &'static str = "podcasts/byfeedid";
///     type Response = FeedResponse;
///
///     fn query(&self) -> Query {
///         let mut query = Query::new();
///         query.set("id", self.id);
///         query
///     }
/// }
/// ```
pub trait Endpoint {
    /// Path relative to the base URL.
    const PATH: &'static str;

    /// Envelope the payload arrives in.
    type Response: DeserializeOwned + Debug;

    /// Query parameters of this request.
    fn query(&self) -> Query;
}

/// Envelope holding a single feed.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedResponse {
    /// `None` if no feed matched.
    #[serde(default, deserialize_with = "found")]
    pub feed: Option<Podcast>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Envelope holding a list of feeds.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct FeedsResponse {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub feeds: Vec<Podcast>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Envelope holding a single episode.
#[derive(Clone, Debug, Deserialize)]
pub struct EpisodeResponse {
    /// `None` if no episode matched.
    #[serde(default, deserialize_with = "found")]
    pub episode: Option<Episode>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Envelope holding a list of episodes.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct EpisodesResponse {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub items: Vec<Episode>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Envelope holding the category list.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct CategoriesResponse {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub feeds: Vec<Category>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::FeedId;

    #[test]
    fn empty_feed_is_not_found() {
        let response: FeedResponse =
            serde_json::from_str(r#"{"status": "true", "feed": [], "description": "No feeds match this id."}"#)
                .unwrap();
        assert!(response.feed.is_none());
    }

    #[test]
    fn feed_is_decoded() {
        let response: FeedResponse =
            serde_json::from_str(r#"{"status": "true", "feed": {"id": 920666}}"#).unwrap();
        assert_eq!(response.feed.unwrap().id, FeedId(920_666));
    }

    #[test]
    fn invalid_feed_is_an_error() {
        let err = serde_json::from_str::<FeedResponse>(
            r#"{"feed": {"id": 1, "link": ":invalid"}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to parse Link ':invalid'"));
    }

    #[test]
    fn null_lists_are_empty() {
        let response: FeedsResponse =
            serde_json::from_str(r#"{"status": "true", "feeds": null, "count": 0}"#).unwrap();
        assert!(response.feeds.is_empty());

        let response: EpisodesResponse = serde_json::from_str(r#"{"status": "true"}"#).unwrap();
        assert!(response.items.is_empty());
    }
}
