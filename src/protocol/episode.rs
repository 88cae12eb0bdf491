//! Wire format of episodes.
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "id": 16795090,
//!     "title": "Batman University Episode 1",
//!     "link": "https://www.theincomparable.com/batmanuniversity/1/",
//!     "datePublished": 1546399813,
//!     "enclosureUrl": "https://example.com/episode1.mp3",
//!     "explicit": 0,
//!     "episodeType": "full",
//!     "feedId": 75075,
//!     "transcripts": [{ "url": "https://example.com/1.vtt", "type": "text/vtt" }],
//!     "persons": [{ "id": 1, "name": "Jason Snell", "role": "host", "img": "..." }]
//! }
//! ```
//!
//! Live items add `status`, `startTime`, `endTime` and `contentLink`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_with::{formats::Flexible, serde_as, DefaultOnNull, DurationSeconds, TimestampSeconds};

use super::codec::{link_string, non_empty, parse_link, via_wire, BoolOrInt};
use crate::{
    episode::{
        Episode, EpisodeId, EpisodeType, LiveItem, LivestreamStatus, Person, PersonId,
        SocialInteract, Soundbite, Transcript, TranscriptType,
    },
    error::FieldError,
    podcast::{FeedId, Guid, ItunesId},
    value::Value,
};

/// JSON shape of an episode or live item.
#[serde_as]
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeWire {
    pub id: u64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub link: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub guid: String,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default)]
    pub date_published: Option<SystemTime>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub date_published_pretty: String,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default)]
    pub date_crawled: Option<SystemTime>,

    #[serde(default)]
    pub enclosure_url: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub enclosure_type: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub enclosure_length: u64,

    #[serde_as(as = "Option<DurationSeconds<u64, Flexible>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,

    #[serde_as(as = "BoolOrInt")]
    #[serde(default)]
    pub explicit: bool,

    #[serde(default)]
    pub episode: Option<i64>,

    #[serde(default)]
    pub episode_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<i64>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_itunes_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    #[serde(default)]
    pub feed_image: Option<String>,

    pub feed_id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podcast_guid: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub feed_language: String,

    #[serde_as(as = "BoolOrInt")]
    #[serde(default)]
    pub feed_dead: bool,

    #[serde(default)]
    pub feed_duplicate_of: Option<u64>,

    #[serde(default)]
    pub chapters_url: Option<String>,

    #[serde(default)]
    pub transcript_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcripts: Option<Vec<Transcript>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundbite: Option<Soundbite>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundbites: Option<Vec<Soundbite>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persons: Option<Vec<Person>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_interact: Option<Vec<SocialInteract>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<SystemTime>,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<SystemTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_link: Option<String>,
}

/// JSON shape of a transcript.
#[serde_as]
#[derive(Debug, Deserialize, Serialize)]
pub struct TranscriptWire {
    #[serde(default)]
    pub url: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// JSON shape of a person.
#[serde_as]
#[derive(Debug, Deserialize, Serialize)]
pub struct PersonWire {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub id: u64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub role: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub href: Option<String>,

    #[serde(default)]
    pub img: Option<String>,
}

/// JSON shape of a social interaction.
#[serde_as]
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialInteractWire {
    #[serde(default)]
    pub url: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub protocol: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub account_id: String,

    #[serde(default)]
    pub account_url: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub priority: i64,
}

/// Parses an optional enumerated text field. Empty means absent.
fn parse_enum<T>(field: &'static str, raw: Option<String>) -> Result<Option<T>, FieldError>
where
    T: std::str::FromStr,
    T::Err: Into<crate::error::BoxError>,
{
    match raw.and_then(non_empty) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e: T::Err| FieldError::new(field, s, e)),
    }
}

impl TryFrom<EpisodeWire> for Episode {
    type Error = FieldError;

    fn try_from(wire: EpisodeWire) -> Result<Self, Self::Error> {
        let live = LiveItem {
            status: parse_enum::<LivestreamStatus>("livestream status", wire.status)?,
            start_time: wire.start_time,
            end_time: wire.end_time,
            content_link: wire.content_link,
        };

        Ok(Self {
            id: EpisodeId(wire.id),
            title: wire.title,
            link: parse_link("Link", wire.link)?,
            description: wire.description,
            guid: wire.guid,
            date_published: wire.date_published.unwrap_or(UNIX_EPOCH),
            date_published_pretty: wire.date_published_pretty,
            date_crawled: wire.date_crawled.unwrap_or(UNIX_EPOCH),
            enclosure_url: parse_link("EnclosureURL", wire.enclosure_url)?,
            enclosure_type: wire.enclosure_type,
            enclosure_length: wire.enclosure_length,
            duration: wire.duration,
            explicit: wire.explicit,
            episode: wire.episode,
            episode_type: parse_enum::<EpisodeType>("episode type", wire.episode_type)?,
            season: wire.season,
            image: parse_link("Image URL", wire.image)?,
            feed_itunes_id: wire.feed_itunes_id.map(ItunesId::from),
            feed_url: parse_link("FeedURL", wire.feed_url)?,
            feed_image: parse_link("FeedImage URL", wire.feed_image)?,
            feed_id: FeedId(wire.feed_id),
            feed_guid: wire.podcast_guid.and_then(non_empty).map(Guid),
            feed_language: wire.feed_language,
            feed_dead: wire.feed_dead,
            feed_duplicate_of: wire.feed_duplicate_of.map(FeedId),
            chapters_url: parse_link("ChaptersURL", wire.chapters_url)?,
            transcript_url: parse_link("TranscriptURL", wire.transcript_url)?,
            transcripts: wire.transcripts,
            soundbite: wire.soundbite,
            soundbites: wire.soundbites,
            persons: wire.persons,
            social_interact: wire.social_interact,
            value: wire.value,
            live: live.new_if_any(),
        })
    }
}

impl TryFrom<&Episode> for EpisodeWire {
    type Error = FieldError;

    fn try_from(episode: &Episode) -> Result<Self, Self::Error> {
        let live = episode.live.clone().unwrap_or_default();

        Ok(Self {
            id: episode.id.0,
            title: episode.title.clone(),
            link: link_string(episode.link.as_ref()),
            description: episode.description.clone(),
            guid: episode.guid.clone(),
            date_published: Some(episode.date_published),
            date_published_pretty: episode.date_published_pretty.clone(),
            date_crawled: Some(episode.date_crawled),
            enclosure_url: link_string(episode.enclosure_url.as_ref()),
            enclosure_type: episode.enclosure_type.clone(),
            enclosure_length: episode.enclosure_length,
            duration: episode.duration,
            explicit: episode.explicit,
            episode: episode.episode,
            episode_type: episode.episode_type.as_ref().map(ToString::to_string),
            season: episode.season,
            image: link_string(episode.image.as_ref()),
            feed_itunes_id: episode
                .feed_itunes_id
                .as_ref()
                .map(ItunesId::to_u64)
                .transpose()?,
            feed_url: episode.feed_url.as_ref().map(ToString::to_string),
            feed_image: link_string(episode.feed_image.as_ref()),
            feed_id: episode.feed_id.0,
            podcast_guid: episode.feed_guid.as_ref().map(ToString::to_string),
            feed_language: episode.feed_language.clone(),
            feed_dead: episode.feed_dead,
            feed_duplicate_of: episode.feed_duplicate_of.map(|id| id.0),
            chapters_url: episode.chapters_url.as_ref().map(ToString::to_string),
            transcript_url: episode.transcript_url.as_ref().map(ToString::to_string),
            transcripts: episode.transcripts.clone(),
            soundbite: episode.soundbite.clone(),
            soundbites: episode.soundbites.clone(),
            persons: episode.persons.clone(),
            social_interact: episode.social_interact.clone(),
            value: episode.value.clone(),
            status: live.status.map(|status| status.to_string()),
            start_time: live.start_time,
            end_time: live.end_time,
            content_link: live.content_link,
        })
    }
}

impl TryFrom<TranscriptWire> for Transcript {
    type Error = FieldError;

    fn try_from(wire: TranscriptWire) -> Result<Self, Self::Error> {
        Ok(Self {
            url: parse_link("transcript URL", wire.url)?,
            kind: parse_enum::<TranscriptType>("transcript type", Some(wire.kind))?,
        })
    }
}

impl From<&Transcript> for TranscriptWire {
    fn from(transcript: &Transcript) -> Self {
        Self {
            url: link_string(transcript.url.as_ref()),
            kind: transcript
                .kind
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<PersonWire> for Person {
    type Error = FieldError;

    fn try_from(wire: PersonWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PersonId(wire.id),
            name: wire.name,
            role: wire.role,
            group: wire.group,
            href: parse_link("person href", wire.href)?,
            image: parse_link("person image URL", wire.img)?,
        })
    }
}

impl From<&Person> for PersonWire {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.0,
            name: person.name.clone(),
            role: person.role.clone(),
            group: person.group.clone(),
            href: link_string(person.href.as_ref()),
            img: link_string(person.image.as_ref()),
        }
    }
}

impl TryFrom<SocialInteractWire> for SocialInteract {
    type Error = FieldError;

    fn try_from(wire: SocialInteractWire) -> Result<Self, Self::Error> {
        Ok(Self {
            url: parse_link("social interact URL", wire.url)?,
            protocol: wire.protocol,
            account_id: wire.account_id,
            account_url: parse_link("account URL", wire.account_url)?,
            priority: wire.priority,
        })
    }
}

impl From<&SocialInteract> for SocialInteractWire {
    fn from(social: &SocialInteract) -> Self {
        Self {
            url: link_string(social.url.as_ref()),
            protocol: social.protocol.clone(),
            account_id: social.account_id.clone(),
            account_url: link_string(social.account_url.as_ref()),
            priority: social.priority,
        }
    }
}

via_wire!(Episode, EpisodeWire);
via_wire!(Transcript, TranscriptWire);
via_wire!(Person, PersonWire);
via_wire!(SocialInteract, SocialInteractWire);
