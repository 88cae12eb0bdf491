//! Client library for the [Podcast Index] API.
//!
//! Signs requests with an API key and secret, issues them over HTTPS and
//! decodes the loosely typed JSON responses into strongly typed values:
//!
//! * [`Podcast`] - a feed, with its categories and payment metadata
//! * [`Episode`] - an episode or live item of a feed
//! * [`Category`] - a category of the index
//!
//! # Example
//!
//! ```ignore
//! use podcastindex::{Client, Config, Credentials};
//!
//! let config = Config::new(Credentials::new("UXKCGDSYGUUEVQJSYDZH", "yzJe2eE7XV..."))
//!     .with_user_agent("SuperPodcastPlayer/1.3");
//! let client = Client::new(&config)?;
//!
//! for podcast in client.search_by_title("batman university", Default::default()).await? {
//!     println!("{}: {}", podcast.id, podcast.title);
//! }
//! ```
//!
//! Nothing is cached or retried: every call makes exactly one request.
//!
//! [Podcast Index]: https://podcastindex.org/
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

#[macro_use]
extern crate log;

pub mod auth;
pub mod client;
pub mod config;
pub mod episode;
pub mod error;
pub mod http;
pub mod link;
pub mod podcast;
pub mod protocol;
pub mod transport;
pub mod value;

pub use client::Client;
pub use config::{Config, Credentials};
pub use episode::{Episode, EpisodeId};
pub use error::{Error, ErrorKind, FieldError, Result};
pub use link::Link;
pub use podcast::{Category, CategoryId, FeedId, Guid, ItunesId, Podcast};
pub use protocol::endpoints::{
    episodes::{EpisodesOptions, LiveEpisodesOptions},
    search::{MusicSearchOptions, SearchByPersonOptions, SearchByTermOptions, SearchByTitleOptions},
};
pub use value::{Value, ValueType};
