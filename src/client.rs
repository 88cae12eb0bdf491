//! Client for the Podcast Index API.
//!
//! One method per endpoint. Lookups return `Ok(None)` when nothing matched;
//! listings and searches return possibly empty vectors.
//!
//! # Example
//!
//! ```ignore
//! use podcastindex::{Client, Config, Credentials};
//!
//! let credentials = Credentials::from_file("secrets.toml")?;
//! let config = Config::new(credentials).with_user_agent("SuperPodcastPlayer/1.3");
//! let client = Client::new(&config)?;
//!
//! if let Some(podcast) = client.podcast_by_feed_id(75_075.into()).await? {
//!     for episode in client.episodes(&podcast, EpisodesOptions::default()).await? {
//!         println!("{}", episode.title);
//!     }
//! }
//! ```
//!
//! # Concurrency
//!
//! The client holds no mutable state. Clone it freely and call it from
//! as many tasks as needed; clones share one connection pool. Dropping a
//! returned future cancels its request.

use url::Url;

use crate::{
    config::Config,
    episode::{Episode, EpisodeId},
    error::Result,
    podcast::{Category, FeedId, Guid, ItunesId, Podcast},
    protocol::endpoints::{
        categories,
        episodes::{self, EpisodesOptions, LiveEpisodesOptions},
        podcasts,
        search::{
            self, MusicSearchOptions, SearchByPersonOptions, SearchByTermOptions,
            SearchByTitleOptions,
        },
    },
    transport::Transport,
};

/// Podcast Index API client.
#[derive(Clone, Debug)]
pub struct Client {
    transport: Transport,
}

impl Client {
    /// Creates a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Creates a client on top of an existing `reqwest::Client`, for custom
    /// TLS or proxy settings.
    #[must_use]
    pub fn with_http_client(config: &Config, http_client: reqwest::Client) -> Self {
        Self {
            transport: Transport::with_http_client(config, http_client),
        }
    }

    /// Returns the underlying transport, for endpoints without a dedicated
    /// method.
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Looks up a feed by its Podcast Index id.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn podcast_by_feed_id(&self, id: FeedId) -> Result<Option<Podcast>> {
        let response = self.transport.request(&podcasts::ByFeedId { id }).await?;
        Ok(response.feed)
    }

    /// Looks up a feed by its `podcast:guid`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn podcast_by_guid(&self, guid: &Guid) -> Result<Option<Podcast>> {
        let request = podcasts::ByGuid { guid: guid.clone() };
        let response = self.transport.request(&request).await?;
        Ok(response.feed)
    }

    /// Looks up a feed by its Apple Podcasts id, with or without `id`
    /// prefix.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the id is not numeric, the request fails or the
    /// response does not decode.
    pub async fn podcast_by_itunes_id(&self, id: &ItunesId) -> Result<Option<Podcast>> {
        let request = podcasts::ByItunesId { id: id.to_u64()? };
        let response = self.transport.request(&request).await?;
        Ok(response.feed)
    }

    /// Looks up a feed by its URL.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn podcast_by_feed_url(&self, url: &Url) -> Result<Option<Podcast>> {
        let request = podcasts::ByFeedUrl { url: url.clone() };
        let response = self.transport.request(&request).await?;
        Ok(response.feed)
    }

    /// Lists the episodes of a feed, most recent first.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn episodes_by_feed_id(
        &self,
        id: FeedId,
        options: EpisodesOptions,
    ) -> Result<Vec<Episode>> {
        let request = episodes::ByFeedId { id, options };
        let response = self.transport.request(&request).await?;
        Ok(response.items)
    }

    /// Lists the episodes of a podcast.
    ///
    /// # Errors
    ///
    /// See [`episodes_by_feed_id`](Self::episodes_by_feed_id).
    pub async fn episodes(
        &self,
        podcast: &Podcast,
        options: EpisodesOptions,
    ) -> Result<Vec<Episode>> {
        self.episodes_by_feed_id(podcast.id, options).await
    }

    /// Looks up a single episode.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn episode_by_id(&self, id: EpisodeId, full_text: bool) -> Result<Option<Episode>> {
        let request = episodes::ById { id, full_text };
        let response = self.transport.request(&request).await?;
        Ok(response.episode)
    }

    /// Lists live items that are currently streaming.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn live_episodes(&self, options: LiveEpisodesOptions) -> Result<Vec<Episode>> {
        let response = self.transport.request(&episodes::Live { options }).await?;
        Ok(response.items)
    }

    /// Searches feeds by a term matched against title, author and owner.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn search_by_term(
        &self,
        term: &str,
        options: SearchByTermOptions,
    ) -> Result<Vec<Podcast>> {
        let request = search::ByTerm {
            term: term.to_owned(),
            options,
        };
        let response = self.transport.request(&request).await?;
        Ok(response.feeds)
    }

    /// Searches feeds by title.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn search_by_title(
        &self,
        title: &str,
        options: SearchByTitleOptions,
    ) -> Result<Vec<Podcast>> {
        let request = search::ByTitle {
            title: title.to_owned(),
            options,
        };
        let response = self.transport.request(&request).await?;
        Ok(response.feeds)
    }

    /// Searches feeds mentioning a person.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn search_by_person(
        &self,
        person: &str,
        options: SearchByPersonOptions,
    ) -> Result<Vec<Podcast>> {
        let request = search::ByPerson {
            person: person.to_owned(),
            options,
        };
        let response = self.transport.request(&request).await?;
        Ok(response.feeds)
    }

    /// Searches music feeds by term.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn search_music_by_term(
        &self,
        term: &str,
        options: MusicSearchOptions,
    ) -> Result<Vec<Podcast>> {
        let request = search::MusicByTerm {
            term: term.to_owned(),
            options,
        };
        let response = self.transport.request(&request).await?;
        Ok(response.feeds)
    }

    /// Lists all categories.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request fails or the response does not
    /// decode.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let response = self.transport.request(&categories::List).await?;
        Ok(response.feeds)
    }
}
