use std::time::{Duration, UNIX_EPOCH};

use pretty_assertions::assert_eq;

use podcastindex::{
    episode::{EpisodeType, LivestreamStatus, TranscriptType},
    podcast::FeedType,
    protocol::endpoints::{EpisodesResponse, FeedsResponse},
    Category, CategoryId, Episode, FeedId, Guid, ItunesId, Link, Podcast,
};

const PODCASTS_BY_TITLE: &str = include_str!("data/podcasts_by_title.json");
const EPISODES_BY_FEED_ID: &str = include_str!("data/episodes_by_feed_id.json");
const LIVE_EPISODES: &str = include_str!("data/live_episodes.json");

fn url(s: &str) -> Option<Link> {
    Some(s.parse().unwrap())
}

fn podcasts() -> Vec<Podcast> {
    serde_json::from_str::<FeedsResponse>(PODCASTS_BY_TITLE)
        .unwrap()
        .feeds
}

fn episodes(json: &str) -> Vec<Episode> {
    serde_json::from_str::<EpisodesResponse>(json).unwrap().items
}

#[test]
fn batman_university() {
    let podcasts = podcasts();
    assert_eq!(podcasts.len(), 2);

    let podcast = &podcasts[0];
    assert_eq!(podcast.id, FeedId(75075));
    assert_eq!(podcast.title, "Batman University");
    assert_eq!(
        podcast.url,
        url("https://feeds.theincomparable.com/batmanuniversity")
    );
    assert_eq!(podcast.original_url, podcast.url);
    assert_eq!(
        podcast.link,
        url("https://www.theincomparable.com/batmanuniversity/")
    );
    assert_eq!(podcast.author, "Tony Sindelar");
    assert_eq!(podcast.owner_name, "");
    assert_eq!(
        podcast.image,
        url("https://www.theincomparable.com/imgs/logos/logo-batmanuniversity-3x.jpg")
    );
    assert_eq!(podcast.artwork, podcast.image);
    assert_eq!(
        podcast.last_update_time,
        UNIX_EPOCH + Duration::from_secs(1_744_427_062)
    );
    assert_eq!(
        podcast.last_crawl_time,
        UNIX_EPOCH + Duration::from_secs(1_744_427_030)
    );
    assert_eq!(
        podcast.last_parse_time,
        UNIX_EPOCH + Duration::from_secs(1_744_427_084)
    );
    assert_eq!(
        podcast.last_good_http_status_time,
        UNIX_EPOCH + Duration::from_secs(1_744_427_030)
    );
    assert_eq!(podcast.last_http_status, 200);
    assert_eq!(podcast.content_type, "application/rss+xml");
    assert_eq!(podcast.itunes_id, Some(ItunesId::from(1_441_923_632)));
    assert_eq!(podcast.itunes_type, None);
    assert_eq!(podcast.generator, "");
    assert_eq!(podcast.language, "en");
    assert!(!podcast.explicit);
    assert_eq!(podcast.feed_type, FeedType::Rss);
    assert_eq!(podcast.medium, "podcast");
    assert!(!podcast.dead);
    assert_eq!(podcast.episode_count, 19);
    assert_eq!(podcast.crawl_errors, 0);
    assert_eq!(podcast.parse_errors, 0);
    assert_eq!(
        podcast.categories,
        vec![
            Category {
                id: CategoryId(104),
                name: "Tv".to_owned(),
            },
            Category {
                id: CategoryId(105),
                name: "Film".to_owned(),
            },
            Category {
                id: CategoryId(107),
                name: "Reviews".to_owned(),
            },
        ]
    );
    assert!(!podcast.locked);
    assert_eq!(podcast.image_url_hash, 1_702_747_127);
    assert_eq!(
        podcast.newest_item_publish_time,
        Some(UNIX_EPOCH + Duration::from_secs(1_546_399_813))
    );
    assert_eq!(
        podcast.guid,
        Some(Guid::from("ac9907f2-a748-59eb-a799-88a9c8bfb9f5"))
    );
    assert_eq!(podcast.value, None);
    assert_eq!(podcast.funding, None);
}

#[test]
fn podcast_with_value_and_funding() {
    let podcast = &podcasts()[1];
    assert!(podcast.locked);
    assert_eq!(podcast.priority, Some(5));
    assert_eq!(podcast.in_polling_queue, Some(false));
    assert_eq!(podcast.itunes_type.as_deref(), Some("episodic"));

    let value = podcast.value.as_ref().unwrap();
    assert_eq!(value.model.kind, "lightning");
    assert_eq!(value.destinations.len(), 2);
    assert_eq!(value.destinations[0].split, 99);
    assert_eq!(value.destinations[0].fee, None);
    assert_eq!(value.destinations[1].fee, Some(true));
    assert_eq!(value.destinations[1].custom_key.as_deref(), Some("906608"));

    let funding = podcast.funding.as_ref().unwrap();
    assert_eq!(funding.url, url("https://podcastindex.org/"));
    assert_eq!(funding.message, "Support the Index");
}

#[test]
fn podcasts_survive_round_trip() {
    for podcast in podcasts() {
        let json = serde_json::to_string(&podcast).unwrap();
        let decoded: Podcast = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, podcast);
    }
}

#[test]
fn relative_link_does_not_fail_list() {
    let response: FeedsResponse = serde_json::from_str(
        r#"{
            "status": "true",
            "feeds": [
                {"id": 75075, "title": "Batman University",
                 "link": "https://www.theincomparable.com/batmanuniversity/"},
                {"id": 75076, "title": "Gotham Nights", "link": "/batman",
                 "image": "www.example.com"}
            ],
            "count": 2
        }"#,
    )
    .unwrap();

    let feeds = response.feeds;
    assert_eq!(feeds.len(), 2);
    assert!(feeds[0].link.as_ref().unwrap().is_absolute());
    assert_eq!(feeds[1].link, Some(Link::Relative("/batman".to_owned())));
    assert_eq!(feeds[1].image.as_ref().map(Link::as_str), Some("www.example.com"));
}

#[test]
fn capitalized_episode_type_does_not_fail_list() {
    let episodes = episodes(
        r#"{
            "status": "true",
            "items": [
                {"id": 1, "feedId": 75075, "episodeType": "Full", "status": "LIVE"},
                {"id": 2, "feedId": 75075, "episodeType": "special"}
            ],
            "count": 2
        }"#,
    );

    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].episode_type, Some(EpisodeType::Full));
    assert_eq!(
        episodes[0].live.as_ref().unwrap().status,
        Some(LivestreamStatus::Live)
    );
    assert_eq!(
        episodes[1].episode_type,
        Some(EpisodeType::Other("special".to_owned()))
    );
}

#[test]
fn batman_university_episodes() {
    let episodes = episodes(EPISODES_BY_FEED_ID);
    assert_eq!(episodes.len(), 2);

    let first = &episodes[0];
    assert_eq!(first.id.0, 16_795_090);
    assert_eq!(first.feed_id, FeedId(75075));
    assert_eq!(
        first.date_published,
        UNIX_EPOCH + Duration::from_secs(1_546_399_813)
    );
    assert_eq!(first.duration, Some(Duration::from_secs(3897)));
    assert_eq!(first.episode, Some(1));
    assert_eq!(first.episode_type, Some(EpisodeType::Full));
    assert_eq!(first.season, Some(1));
    assert_eq!(first.image, None);
    assert_eq!(first.transcript_url, None);
    assert!(!first.explicit);
    assert!(!first.is_live_item());

    let transcripts = first.transcripts.as_ref().unwrap();
    assert_eq!(transcripts[0].kind, Some(TranscriptType::Vtt));

    let persons = first.persons.as_ref().unwrap();
    assert_eq!(persons[0].name, "Tony Sindelar");
    assert_eq!(
        persons[0].image,
        url("https://www.theincomparable.com/imgs/people/tony_sindelar.jpg")
    );

    let soundbites = first.soundbites.as_ref().unwrap();
    assert_eq!(soundbites[0].start_time, 120.5);
    assert_eq!(soundbites[0].duration, 42.0);

    let trailer = &episodes[1];
    assert_eq!(
        trailer.date_published,
        UNIX_EPOCH + Duration::from_secs(1_546_300_000)
    );
    assert_eq!(trailer.duration, None);
    assert_eq!(trailer.episode, None);
    assert_eq!(trailer.episode_type, Some(EpisodeType::Trailer));
    assert_eq!(trailer.feed_url, None);
    assert!(trailer.explicit);
    assert!(!trailer.feed_dead);
}

#[test]
fn live_item() {
    let episodes = episodes(LIVE_EPISODES);
    assert_eq!(episodes.len(), 1);

    let episode = &episodes[0];
    assert!(episode.is_live_item());

    let live = episode.live.as_ref().unwrap();
    assert_eq!(live.status, Some(LivestreamStatus::Live));
    assert_eq!(
        live.start_time,
        Some(UNIX_EPOCH + Duration::from_secs(1_706_292_000))
    );
    assert_eq!(
        live.end_time,
        Some(UNIX_EPOCH + Duration::from_secs(1_706_299_200))
    );
    assert_eq!(
        live.content_link.as_deref(),
        Some("https://stream.example.com/pc20")
    );
    assert_eq!(episode.value.as_ref().unwrap().destinations[0].split, 100);
}

#[test]
fn episodes_survive_round_trip() {
    for json in [EPISODES_BY_FEED_ID, LIVE_EPISODES] {
        for episode in episodes(json) {
            let json = serde_json::to_string(&episode).unwrap();
            let decoded: Episode = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, episode);
        }
    }
}
