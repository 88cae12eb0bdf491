//! Podcast feeds as known to the index.
//!
//! A [`Podcast`] is an immutable snapshot of a feed, decoded from a lookup
//! or search response. Its wire form lives in
//! [`protocol::podcast`](crate::protocol::podcast); this module only holds
//! the typed model.
//!
//! # Identifiers
//!
//! A feed can be looked up by three kinds of identifier:
//! * [`FeedId`] - the index's own numeric id, always present
//! * [`Guid`] - the global `podcast:guid` of the feed, if it has one
//! * [`ItunesId`] - the Apple Podcasts id, if known

use std::{convert::Infallible, fmt, num::ParseIntError, str::FromStr, time::SystemTime};

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::{error::FieldError, link::Link, value::Value};

/// Internal Podcast Index feed id.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeedId(pub u64);

impl From<u64> for FeedId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for FeedId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Global identifier from the `podcast:guid` tag of a feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(pub String);

impl From<String> for Guid {
    fn from(guid: String) -> Self {
        Self(guid)
    }
}

impl From<&str> for Guid {
    fn from(guid: &str) -> Self {
        Self(guid.to_owned())
    }
}

impl FromStr for Guid {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Apple Podcasts id of a feed.
///
/// Apple writes these with an `id` prefix in its URLs
/// (`https://podcasts.apple.com/podcast/id1441923632`), while the API wants
/// the bare number. Both spellings are accepted; the conversion to the
/// number happens in [`to_u64`](Self::to_u64).
///
/// # Examples
///
/// ```ignore
/// let id: ItunesId = "id1441923632".parse()?;
/// assert_eq!(id.to_u64()?, 1_441_923_632);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItunesId(String);

impl ItunesId {
    /// Prefix Apple puts in front of the number.
    const PREFIX: &'static str = "id";

    /// Returns the id as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric id, without any `id` prefix.
    ///
    /// # Errors
    ///
    /// Will return `Err` if what remains after the prefix is not a decimal
    /// number.
    pub fn to_u64(&self) -> Result<u64, FieldError> {
        let digits = self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0);
        digits
            .parse()
            .map_err(|e| FieldError::new("iTunes ID", self.0.as_str(), e))
    }
}

impl From<u64> for ItunesId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for ItunesId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_owned()))
    }
}

impl fmt::Display for ItunesId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric id of a category.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for CategoryId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category, as listed by the categories endpoint and attached to feeds.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Source format of a feed.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
pub enum FeedType {
    #[default]
    Rss = 0,
    Atom = 1,
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Rss => write!(f, "RSS"),
            Self::Atom => write!(f, "Atom"),
        }
    }
}

/// Funding link from the `podcast:funding` tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Funding {
    pub url: Option<Link>,
    /// Call to action shown next to the link.
    pub message: String,
}

/// A podcast feed.
///
/// Timestamps that the index always records are plain [`SystemTime`]s and
/// default to the Unix epoch when a response leaves them out. Optional
/// values are `None` only when the response does not report them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Podcast {
    /// Internal Podcast Index feed id.
    pub id: FeedId,
    /// Global identifier from the `podcast:guid` tag.
    pub guid: Option<Guid>,
    pub title: String,
    /// Current feed URL.
    pub url: Option<Link>,
    /// Feed URL before it changed to the current one.
    pub original_url: Option<Link>,
    /// Channel-level link.
    pub link: Option<Link>,
    /// Longest of the channel-level description fields.
    pub description: String,
    pub author: String,
    pub owner_name: String,
    pub image: Option<Link>,
    /// Best artwork known for the feed. Often the same as `image`.
    pub artwork: Option<Link>,
    /// Channel-level `pubDate` if sane, otherwise a heuristic.
    pub last_update_time: SystemTime,
    pub last_crawl_time: SystemTime,
    pub last_parse_time: SystemTime,
    /// Last time the feed URL answered with neither a 4xx nor a 5xx status.
    pub last_good_http_status_time: SystemTime,
    /// Last status code from pulling the feed. Codes starting with 9 are
    /// internal to the crawler.
    pub last_http_status: i64,
    /// `Content-Type` of the last pull.
    pub content_type: String,
    pub itunes_id: Option<ItunesId>,
    /// `episodic` or `serial`.
    pub itunes_type: Option<String>,
    pub generator: String,
    /// RSS language code.
    pub language: String,
    pub explicit: bool,
    pub feed_type: FeedType,
    /// Value of `podcast:medium`, e.g. `podcast` or `music`.
    pub medium: String,
    /// Feed is no longer polled after too many errors.
    pub dead: bool,
    pub episode_count: u64,
    pub crawl_errors: u64,
    pub parse_errors: u64,
    pub in_polling_queue: Option<bool>,
    /// Polling frequency from -1 (never) to 5 (most often).
    pub priority: Option<i64>,
    /// Distinct by id.
    pub categories: Vec<Category>,
    /// Other platforms must not import this feed.
    pub locked: bool,
    /// CRC32 of the image URL without its scheme.
    pub image_url_hash: u64,
    pub newest_item_publish_time: Option<SystemTime>,
    pub value: Option<Value>,
    pub funding: Option<Funding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itunes_id_strips_prefix() {
        let id: ItunesId = "id1441923632".parse().unwrap();
        assert_eq!(id.to_u64().unwrap(), 1_441_923_632);

        let id: ItunesId = "1441923632".parse().unwrap();
        assert_eq!(id.to_u64().unwrap(), 1_441_923_632);
    }

    #[test]
    fn itunes_id_rejects_non_numeric() {
        let id: ItunesId = "idabc".parse().unwrap();
        let err = id.to_u64().unwrap_err();
        assert_eq!(err.field, "iTunes ID");
        assert_eq!(err.value, "idabc");

        let id: ItunesId = "".parse().unwrap();
        assert!(id.to_u64().is_err());
    }

    #[test]
    fn itunes_id_from_number() {
        assert_eq!(ItunesId::from(42).as_str(), "42");
    }

    #[test]
    fn feed_type_is_numeric() {
        assert_eq!(serde_json::to_string(&FeedType::Atom).unwrap(), "1");
        assert_eq!(
            serde_json::from_str::<FeedType>("0").unwrap(),
            FeedType::Rss
        );
        assert!(serde_json::from_str::<FeedType>("2").is_err());
    }
}
