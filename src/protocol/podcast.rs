//! Wire format of podcast feeds.
//!
//! Feeds are decoded in two steps: first into [`PodcastWire`], which
//! mirrors the JSON closely and absorbs its loose typing, then into the
//! domain [`Podcast`], which parses URLs, categories and identifiers and
//! reports the first field that does not convert. Encoding runs the same
//! steps in reverse.
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "id": 75075,
//!     "podcastGuid": "9b024349-ccf0-5f69-a609-6b82873eab3c",
//!     "title": "Batman University",
//!     "url": "https://feeds.theincomparable.com/batmanuniversity",
//!     "lastUpdateTime": 1613394044,
//!     "itunesId": 1441923632,
//!     "explicit": false,
//!     "dead": 0,
//!     "categories": { "104": "Tv", "105": "Film" },
//!     "locked": 0
//! }
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_with::{formats::Flexible, serde_as, DefaultOnNull, Map, TimestampSeconds};

use super::codec::{link_string, non_empty, parse_link, via_wire, BoolOrInt};
use crate::{
    error::FieldError,
    podcast::{Category, CategoryId, FeedId, FeedType, Funding, Guid, ItunesId, Podcast},
    value::Value,
};

/// JSON shape of a feed.
#[serde_as]
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastWire {
    pub id: u64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub podcast_guid: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub original_url: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub author: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub owner_name: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub artwork: Option<String>,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default)]
    pub last_update_time: Option<SystemTime>,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default)]
    pub last_crawl_time: Option<SystemTime>,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default)]
    pub last_parse_time: Option<SystemTime>,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default)]
    pub last_good_http_status_time: Option<SystemTime>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub last_http_status: i64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub content_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itunes_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itunes_type: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub generator: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub language: String,

    /// Sent as a boolean by most endpoints, and written back as one.
    #[serde_as(deserialize_as = "BoolOrInt")]
    #[serde(default)]
    pub explicit: bool,

    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub feed_type: FeedType,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub medium: String,

    #[serde_as(as = "BoolOrInt")]
    #[serde(default)]
    pub dead: bool,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub episode_count: u64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub crawl_errors: u64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub parse_errors: u64,

    #[serde_as(as = "Option<BoolOrInt>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_polling_queue: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Stringified category id to category name, in response order.
    #[serde_as(as = "Option<Map<_, _>>")]
    #[serde(default)]
    pub categories: Option<Vec<(String, String)>>,

    #[serde_as(as = "BoolOrInt")]
    #[serde(default)]
    pub locked: bool,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub image_url_hash: u64,

    #[serde(rename = "newestItemPubdate", alias = "newestItemPublishTime")]
    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_item_pubdate: Option<SystemTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<Funding>,
}

/// JSON shape of a funding link.
#[serde_as]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FundingWire {
    #[serde(default)]
    pub url: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub message: String,
}

/// Converts stringified category pairs, keeping the first name for an id
/// that occurs more than once.
fn categories_from_wire(pairs: Vec<(String, String)>) -> Result<Vec<Category>, FieldError> {
    let mut categories: Vec<Category> = Vec::with_capacity(pairs.len());

    for (key, name) in pairs {
        let id: CategoryId = key
            .parse()
            .map_err(|e| FieldError::new("category ID", key.as_str(), e))?;

        if categories.iter().any(|category| category.id == id) {
            warn!("ignoring duplicate category {id} ({name})");
            continue;
        }

        categories.push(Category { id, name });
    }

    Ok(categories)
}

fn categories_to_wire(categories: &[Category]) -> Vec<(String, String)> {
    categories
        .iter()
        .map(|category| (category.id.to_string(), category.name.clone()))
        .collect()
}

impl TryFrom<PodcastWire> for Podcast {
    type Error = FieldError;

    fn try_from(wire: PodcastWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: FeedId(wire.id),
            guid: non_empty(wire.podcast_guid).map(Guid),
            title: wire.title,
            url: parse_link("URL", wire.url)?,
            original_url: parse_link("OriginalURL", wire.original_url)?,
            link: parse_link("Link", wire.link)?,
            description: wire.description,
            author: wire.author,
            owner_name: wire.owner_name,
            image: parse_link("Image URL", wire.image)?,
            artwork: parse_link("Artwork URL", wire.artwork)?,
            last_update_time: wire.last_update_time.unwrap_or(UNIX_EPOCH),
            last_crawl_time: wire.last_crawl_time.unwrap_or(UNIX_EPOCH),
            last_parse_time: wire.last_parse_time.unwrap_or(UNIX_EPOCH),
            last_good_http_status_time: wire.last_good_http_status_time.unwrap_or(UNIX_EPOCH),
            last_http_status: wire.last_http_status,
            content_type: wire.content_type,
            itunes_id: wire.itunes_id.map(ItunesId::from),
            itunes_type: wire.itunes_type,
            generator: wire.generator,
            language: wire.language,
            explicit: wire.explicit,
            feed_type: wire.feed_type,
            medium: wire.medium,
            dead: wire.dead,
            episode_count: wire.episode_count,
            crawl_errors: wire.crawl_errors,
            parse_errors: wire.parse_errors,
            in_polling_queue: wire.in_polling_queue,
            priority: wire.priority,
            categories: categories_from_wire(wire.categories.unwrap_or_default())?,
            locked: wire.locked,
            image_url_hash: wire.image_url_hash,
            newest_item_publish_time: wire.newest_item_pubdate,
            value: wire.value,
            funding: wire.funding,
        })
    }
}

impl TryFrom<&Podcast> for PodcastWire {
    type Error = FieldError;

    fn try_from(podcast: &Podcast) -> Result<Self, Self::Error> {
        Ok(Self {
            id: podcast.id.0,
            podcast_guid: podcast
                .guid
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            title: podcast.title.clone(),
            url: link_string(podcast.url.as_ref()),
            original_url: link_string(podcast.original_url.as_ref()),
            link: link_string(podcast.link.as_ref()),
            description: podcast.description.clone(),
            author: podcast.author.clone(),
            owner_name: podcast.owner_name.clone(),
            image: link_string(podcast.image.as_ref()),
            artwork: link_string(podcast.artwork.as_ref()),
            last_update_time: Some(podcast.last_update_time),
            last_crawl_time: Some(podcast.last_crawl_time),
            last_parse_time: Some(podcast.last_parse_time),
            last_good_http_status_time: Some(podcast.last_good_http_status_time),
            last_http_status: podcast.last_http_status,
            content_type: podcast.content_type.clone(),
            itunes_id: podcast
                .itunes_id
                .as_ref()
                .map(ItunesId::to_u64)
                .transpose()?,
            itunes_type: podcast.itunes_type.clone(),
            generator: podcast.generator.clone(),
            language: podcast.language.clone(),
            explicit: podcast.explicit,
            feed_type: podcast.feed_type,
            medium: podcast.medium.clone(),
            dead: podcast.dead,
            episode_count: podcast.episode_count,
            crawl_errors: podcast.crawl_errors,
            parse_errors: podcast.parse_errors,
            in_polling_queue: podcast.in_polling_queue,
            priority: podcast.priority,
            categories: Some(categories_to_wire(&podcast.categories)),
            locked: podcast.locked,
            image_url_hash: podcast.image_url_hash,
            newest_item_pubdate: podcast.newest_item_publish_time,
            value: podcast.value.clone(),
            funding: podcast.funding.clone(),
        })
    }
}

impl TryFrom<FundingWire> for Funding {
    type Error = FieldError;

    fn try_from(wire: FundingWire) -> Result<Self, Self::Error> {
        Ok(Self {
            url: parse_link("funding URL", wire.url)?,
            message: wire.message,
        })
    }
}

impl From<&Funding> for FundingWire {
    fn from(funding: &Funding) -> Self {
        Self {
            url: funding.url.as_ref().map(ToString::to_string),
            message: funding.message.clone(),
        }
    }
}

via_wire!(Podcast, PodcastWire);
via_wire!(Funding, FundingWire);

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Link;

    #[test]
    fn decodes_minimal_feed() {
        let podcast: Podcast = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(podcast.id, FeedId(1));
        assert_eq!(podcast.guid, None);
        assert_eq!(podcast.url, None);
        assert_eq!(podcast.last_update_time, UNIX_EPOCH);
        assert!(podcast.categories.is_empty());
        assert_eq!(podcast.newest_item_publish_time, None);
    }

    #[test]
    fn requires_id() {
        assert!(serde_json::from_str::<Podcast>(r#"{"title": "x"}"#).is_err());
    }

    #[test]
    fn malformed_url_names_field() {
        let err = serde_json::from_str::<Podcast>(r#"{"id": 1, "url": ":invalid"}"#).unwrap_err();
        assert!(err.to_string().contains("failed to parse URL ':invalid'"));

        let err = serde_json::from_str::<Podcast>(r#"{"id": 1, "artwork": ":invalid"}"#)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("failed to parse Artwork URL ':invalid'"));
    }

    #[test]
    fn relative_links_are_kept() {
        let podcast: Podcast = serde_json::from_str(
            r#"{"id": 1, "link": "www.example.com", "image": "/batman", "artwork": ""}"#,
        )
        .unwrap();
        assert_eq!(podcast.link, Some(Link::Relative("www.example.com".to_string())));
        assert_eq!(podcast.image, Some(Link::Relative("/batman".to_string())));
        assert_eq!(podcast.artwork, None);

        let json = serde_json::to_value(&podcast).unwrap();
        assert_eq!(json["link"], "www.example.com");
        assert_eq!(json["image"], "/batman");
    }

    #[test]
    fn decodes_categories() {
        let podcast: Podcast = serde_json::from_str(
            r#"{"id": 1, "categories": {"104": "Tv", "105": "Film", "107": "Reviews"}}"#,
        )
        .unwrap();

        let mut categories = podcast.categories;
        categories.sort();
        assert_eq!(
            categories,
            vec![
                Category {
                    id: CategoryId(104),
                    name: "Tv".to_string()
                },
                Category {
                    id: CategoryId(105),
                    name: "Film".to_string()
                },
                Category {
                    id: CategoryId(107),
                    name: "Reviews".to_string()
                },
            ]
        );
    }

    #[test]
    fn non_numeric_category_names_key() {
        let err = serde_json::from_str::<Podcast>(r#"{"id": 1, "categories": {"abc": "Tv"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse category ID 'abc'"));
    }

    #[test]
    fn duplicate_categories_keep_first() {
        let categories = categories_from_wire(vec![
            ("1".to_string(), "Arts".to_string()),
            ("01".to_string(), "Books".to_string()),
        ])
        .unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Arts");
    }

    #[test]
    fn null_categories_are_empty() {
        let podcast: Podcast =
            serde_json::from_str(r#"{"id": 1, "categories": null}"#).unwrap();
        assert!(podcast.categories.is_empty());
    }

    #[test]
    fn accepts_either_newest_item_key() {
        let expected = Some(UNIX_EPOCH + Duration::from_secs(1_613_394_044));

        let podcast: Podcast =
            serde_json::from_str(r#"{"id": 1, "newestItemPubdate": 1613394044}"#).unwrap();
        assert_eq!(podcast.newest_item_publish_time, expected);

        let podcast: Podcast =
            serde_json::from_str(r#"{"id": 1, "newestItemPublishTime": 1613394044}"#).unwrap();
        assert_eq!(podcast.newest_item_publish_time, expected);
    }

    #[test]
    fn flags_accept_integers_and_booleans() {
        let podcast: Podcast = serde_json::from_str(
            r#"{"id": 1, "explicit": 1, "dead": true, "locked": 0, "inPollingQueue": 1}"#,
        )
        .unwrap();
        assert!(podcast.explicit);
        assert!(podcast.dead);
        assert!(!podcast.locked);
        assert_eq!(podcast.in_polling_queue, Some(true));
    }

    #[test]
    fn encodes_timestamps_as_seconds() {
        let podcast: Podcast =
            serde_json::from_str(r#"{"id": 1, "lastUpdateTime": 1613394044}"#).unwrap();
        let json = serde_json::to_value(&podcast).unwrap();
        assert_eq!(json["lastUpdateTime"], 1_613_394_044);
        assert_eq!(json["url"], "");
        assert_eq!(json["dead"], 0);
        assert_eq!(json["explicit"], false);
    }

    #[test]
    fn encoding_rejects_non_numeric_itunes_id() {
        let mut podcast: Podcast = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        podcast.itunes_id = Some("idxyz".parse().unwrap());
        let err = serde_json::to_string(&podcast).unwrap_err();
        assert!(err.to_string().contains("failed to parse iTunes ID 'idxyz'"));
    }

    #[test]
    fn decodes_funding() {
        let podcast: Podcast = serde_json::from_str(
            r#"{"id": 1, "funding": {"url": "https://example.com/donate", "message": "Support us"}}"#,
        )
        .unwrap();
        let funding = podcast.funding.unwrap();
        assert_eq!(funding.url.unwrap().as_str(), "https://example.com/donate");
        assert_eq!(funding.message, "Support us");
    }
}
