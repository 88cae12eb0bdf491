//! Episode listings and lookups.

use super::{Endpoint, EpisodeResponse, EpisodesResponse};
use crate::{episode::EpisodeId, podcast::FeedId, protocol::query::Query};

/// Options of [`ByFeedId`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EpisodesOptions {
    /// Maximum number of episodes, at most 99.
    pub max: Option<u32>,
    /// Return descriptions untruncated.
    pub full_text: bool,
}

/// Episodes of a feed, most recent first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByFeedId {
    pub id: FeedId,
    pub options: EpisodesOptions,
}

impl Endpoint for ByFeedId {
    const PATH: &'static str = "episodes/byfeedid";
    type Response = EpisodesResponse;

    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .set("id", self.id)
            .max(self.options.max)
            .flag("fulltext", self.options.full_text);
        query
    }
}

/// A single episode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ById {
    pub id: EpisodeId,
    pub full_text: bool,
}

impl Endpoint for ById {
    const PATH: &'static str = "episodes/byid";
    type Response = EpisodeResponse;

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.set("id", self.id).flag("fulltext", self.full_text);
        query
    }
}

/// Options of [`Live`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LiveEpisodesOptions {
    /// Maximum number of live items, at most 99.
    pub max: Option<u32>,
}

/// Live items that are currently streaming.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Live {
    pub options: LiveEpisodesOptions,
}

impl Endpoint for Live {
    const PATH: &'static str = "episodes/live";
    type Response = EpisodesResponse;

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.max(self.options.max);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episodes_query() {
        let request = ByFeedId {
            id: FeedId(75075),
            options: EpisodesOptions {
                max: Some(100),
                full_text: true,
            },
        };
        assert_eq!(request.query().encode(), "fulltext=&id=75075&max=99");
    }

    #[test]
    fn live_without_options_has_no_query() {
        assert!(Live::default().query().is_empty());
    }
}
