//! Feed lookups.
//!
//! All lookups answer with a [`FeedResponse`] whose `feed` is empty when
//! nothing matched.

use url::Url;

use super::{Endpoint, FeedResponse};
use crate::{
    podcast::{FeedId, Guid},
    protocol::query::Query,
};

/// Feed by Podcast Index id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByFeedId {
    pub id: FeedId,
}

impl Endpoint for ByFeedId {
    const PATH: &'static str = "podcasts/byfeedid";
    type Response = FeedResponse;

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.set("id", self.id);
        query
    }
}

/// Feed by `podcast:guid`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByGuid {
    pub guid: Guid,
}

impl Endpoint for ByGuid {
    const PATH: &'static str = "podcasts/byguid";
    type Response = FeedResponse;

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.set("guid", &self.guid);
        query
    }
}

/// Feed by numeric Apple Podcasts id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByItunesId {
    pub id: u64,
}

impl Endpoint for ByItunesId {
    const PATH: &'static str = "podcasts/byitunesid";
    type Response = FeedResponse;

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.set("id", self.id);
        query
    }
}

/// Feed by feed URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByFeedUrl {
    pub url: Url,
}

impl Endpoint for ByFeedUrl {
    const PATH: &'static str = "podcasts/byfeedurl";
    type Response = FeedResponse;

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.set("url", &self.url);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itunes_id_is_bare_number() {
        let request = ByItunesId { id: 1_441_923_632 };
        assert_eq!(request.query().encode(), "id=1441923632");
    }

    #[test]
    fn feed_url_is_escaped() {
        let request = ByFeedUrl {
            url: Url::parse("https://feeds.theincomparable.com/batmanuniversity").unwrap(),
        };
        assert_eq!(
            request.query().encode(),
            "url=https%3A%2F%2Ffeeds.theincomparable.com%2Fbatmanuniversity"
        );
    }
}
