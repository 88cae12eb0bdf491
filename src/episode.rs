//! Episodes and live items.
//!
//! An [`Episode`] is one item of a feed. Live items are episodes that
//! represent a livestream: they carry a [`LiveItem`] with the stream status
//! and schedule, and regular episodes never do.

use std::{
    convert::Infallible, fmt, num::ParseIntError, str::FromStr, time::Duration, time::SystemTime,
};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DeserializeFromStr, SerializeDisplay};

use crate::{
    link::Link,
    podcast::{FeedId, Guid, ItunesId},
    value::Value,
};

/// Internal Podcast Index episode id.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EpisodeId(pub u64);

impl From<u64> for EpisodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for EpisodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of episode, from `itunes:episodeType`.
///
/// Matched without regard to case. Anything else is kept verbatim in
/// [`EpisodeType::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum EpisodeType {
    Full,
    Trailer,
    Bonus,
    Other(String),
}

impl fmt::Display for EpisodeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Trailer => write!(f, "trailer"),
            Self::Bonus => write!(f, "bonus"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EpisodeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let episode_type = match s.to_ascii_lowercase().as_str() {
            "full" => Self::Full,
            "trailer" => Self::Trailer,
            "bonus" => Self::Bonus,
            _ => Self::Other(s.to_owned()),
        };

        Ok(episode_type)
    }
}

/// Status of a livestream.
///
/// Matched without regard to case. Anything else is kept verbatim in
/// [`LivestreamStatus::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum LivestreamStatus {
    Pending,
    Live,
    Ended,
    Other(String),
}

impl fmt::Display for LivestreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Live => write!(f, "live"),
            Self::Ended => write!(f, "ended"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for LivestreamStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "live" => Self::Live,
            "ended" => Self::Ended,
            _ => Self::Other(s.to_owned()),
        };

        Ok(status)
    }
}

/// Fields only present on live items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LiveItem {
    pub status: Option<LivestreamStatus>,
    pub start_time: Option<SystemTime>,
    pub end_time: Option<SystemTime>,
    pub content_link: Option<String>,
}

impl LiveItem {
    /// Returns `None` if none of the live fields are set.
    #[must_use]
    pub fn new_if_any(self) -> Option<Self> {
        (self != Self::default()).then_some(self)
    }
}

/// Format of a transcript file.
///
/// Feeds may declare types beyond the common ones; those are kept verbatim
/// in [`Other`](Self::Other).
#[derive(Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum TranscriptType {
    Plaintext,
    Html,
    Vtt,
    ApplicationSrt,
    TextSrt,
    Json,
    Other(String),
}

impl fmt::Display for TranscriptType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Plaintext => write!(f, "text/plain"),
            Self::Html => write!(f, "text/html"),
            Self::Vtt => write!(f, "text/vtt"),
            Self::ApplicationSrt => write!(f, "application/srt"),
            Self::TextSrt => write!(f, "text/srt"),
            Self::Json => write!(f, "application/json"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for TranscriptType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let transcript_type = match s {
            "text/plain" => Self::Plaintext,
            "text/html" => Self::Html,
            "text/vtt" => Self::Vtt,
            "application/srt" | "application/x-subrip" => Self::ApplicationSrt,
            "text/srt" => Self::TextSrt,
            "application/json" => Self::Json,
            _ => Self::Other(s.to_owned()),
        };

        Ok(transcript_type)
    }
}

/// A transcript of an episode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transcript {
    pub url: Option<Link>,
    /// `None` if the feed did not declare a type.
    pub kind: Option<TranscriptType>,
}

/// Podcast Index id of a person.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub u64);

/// Someone with an interest in an episode, from `podcast:person`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Role within the group, e.g. `host` or `guest`.
    pub role: String,
    /// Role group, e.g. `cast`.
    pub group: String,
    pub href: Option<Link>,
    pub image: Option<Link>,
}

/// A clip of an episode suited for sharing.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Soundbite {
    /// Offset in seconds from the start of the episode.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub start_time: f64,

    /// Length in seconds.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub duration: f64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub title: String,
}

/// A place to comment on an episode, from `podcast:socialInteract`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SocialInteract {
    /// Root post of the comment thread.
    pub url: Option<Link>,
    /// Protocol of the thread, e.g. `activitypub`.
    pub protocol: String,
    pub account_id: String,
    pub account_url: Option<Link>,
    pub priority: i64,
}

/// An episode of a podcast.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    /// Internal Podcast Index episode id.
    pub id: EpisodeId,
    pub title: String,
    pub link: Option<Link>,
    pub description: String,
    /// Item GUID as written in the feed.
    pub guid: String,
    pub date_published: SystemTime,
    /// `date_published` as formatted by the server, in its local time.
    pub date_published_pretty: String,
    /// When the episode was first found in the feed.
    pub date_crawled: SystemTime,
    pub enclosure_url: Option<Link>,
    pub enclosure_type: String,
    /// Enclosure size in bytes.
    pub enclosure_length: u64,
    pub duration: Option<Duration>,
    pub explicit: bool,
    pub episode: Option<i64>,
    pub episode_type: Option<EpisodeType>,
    pub season: Option<i64>,
    pub image: Option<Link>,
    pub feed_itunes_id: Option<ItunesId>,
    pub feed_url: Option<Link>,
    pub feed_image: Option<Link>,
    /// Feed this episode belongs to.
    pub feed_id: FeedId,
    pub feed_guid: Option<Guid>,
    pub feed_language: String,
    pub feed_dead: bool,
    /// Feed that the owning feed duplicates, if any.
    pub feed_duplicate_of: Option<FeedId>,
    pub chapters_url: Option<Link>,
    /// Prefer `transcripts` where reported.
    pub transcript_url: Option<Link>,
    pub transcripts: Option<Vec<Transcript>>,
    pub soundbite: Option<Soundbite>,
    pub soundbites: Option<Vec<Soundbite>>,
    pub persons: Option<Vec<Person>>,
    pub social_interact: Option<Vec<SocialInteract>>,
    pub value: Option<Value>,
    /// Present only for live items.
    pub live: Option<LiveItem>,
}

impl Episode {
    /// Returns `true` if this episode represents a livestream.
    #[must_use]
    pub fn is_live_item(&self) -> bool {
        self.live.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_types_round_trip() {
        for s in [
            "text/plain",
            "text/html",
            "text/vtt",
            "application/srt",
            "text/srt",
            "application/json",
            "application/x-custom",
        ] {
            let kind: TranscriptType = s.parse().unwrap();
            assert_eq!(kind.to_string(), s);
        }
    }

    #[test]
    fn episode_types_ignore_case() {
        assert_eq!("bonus".parse::<EpisodeType>().unwrap(), EpisodeType::Bonus);
        assert_eq!("Full".parse::<EpisodeType>().unwrap(), EpisodeType::Full);
        assert_eq!("TRAILER".parse::<EpisodeType>().unwrap(), EpisodeType::Trailer);
        assert_eq!(
            "special".parse::<EpisodeType>().unwrap(),
            EpisodeType::Other("special".to_owned())
        );
    }

    #[test]
    fn livestream_statuses_ignore_case() {
        assert_eq!("Live".parse::<LivestreamStatus>().unwrap(), LivestreamStatus::Live);
        assert_eq!("ENDED".parse::<LivestreamStatus>().unwrap(), LivestreamStatus::Ended);

        let status: LivestreamStatus = "postponed".parse().unwrap();
        assert_eq!(status, LivestreamStatus::Other("postponed".to_owned()));
        assert_eq!(status.to_string(), "postponed");
    }

    #[test]
    fn empty_live_item_is_none() {
        assert_eq!(LiveItem::default().new_if_any(), None);

        let live = LiveItem {
            status: Some(LivestreamStatus::Live),
            ..Default::default()
        };
        assert_eq!(live.clone().new_if_any(), Some(live));
    }
}
