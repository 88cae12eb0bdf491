use std::{
    error::Error,
    io,
    path::{Path, PathBuf},
    process,
    time::Duration,
};

use clap::{command, Parser, Subcommand, ValueEnum, ValueHint};
use log::{debug, error, info, LevelFilter};
use serde::Serialize;
use url::Url;

use podcastindex::{
    Client, Config, Credentials, EpisodeId, EpisodesOptions, FeedId, Guid, ItunesId,
    LiveEpisodesOptions, MusicSearchOptions, SearchByPersonOptions, SearchByTermOptions,
    SearchByTitleOptions, ValueType,
};

/// Build profile, for the startup log line.
#[cfg(debug_assertions)]
const BUILD_PROFILE: &str = "debug";
/// Build profile, for the startup log line.
#[cfg(not(debug_assertions))]
const BUILD_PROFILE: &str = "release";

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Group name for mutually exclusive feed identifiers.
const ARGS_GROUP_FEED: &str = "feed";

/// Command line arguments.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Secrets file
    ///
    /// TOML file with `api_key` and `api_secret`. Keep this file private:
    /// anyone holding it can make requests on your behalf.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath, default_value = "secrets.toml", env = "PODCASTINDEX_SECRETS_FILE")]
    secrets_file: PathBuf,

    /// API base URL
    #[arg(long, value_hint = ValueHint::Url, default_value = Config::DEFAULT_BASE_URL)]
    base_url: Url,

    /// Request timeout in seconds
    ///
    /// Set to 0 to wait indefinitely.
    #[arg(long, value_name = "SECONDS", default_value_t = Config::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// User agent to identify as
    #[arg(long)]
    user_agent: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Log debug messages
    ///
    /// Repeat (`-vv`) to also log trace messages, including full responses.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Look up a podcast
    #[command(group = clap::ArgGroup::new(ARGS_GROUP_FEED).required(true))]
    Podcast {
        /// Podcast Index feed id
        #[arg(long, group = ARGS_GROUP_FEED)]
        id: Option<FeedId>,

        /// Global podcast GUID
        #[arg(long, group = ARGS_GROUP_FEED)]
        guid: Option<Guid>,

        /// Apple Podcasts id, with or without `id` prefix
        #[arg(long, group = ARGS_GROUP_FEED)]
        itunes_id: Option<ItunesId>,

        /// Feed URL
        #[arg(long, group = ARGS_GROUP_FEED, value_hint = ValueHint::Url)]
        url: Option<Url>,
    },

    /// List the episodes of a podcast
    Episodes {
        /// Podcast Index feed id
        feed_id: FeedId,

        /// Maximum number of episodes (at most 99)
        #[arg(short, long)]
        max: Option<u32>,

        /// Return descriptions untruncated
        #[arg(long)]
        full_text: bool,
    },

    /// Look up a single episode
    Episode {
        /// Podcast Index episode id
        id: EpisodeId,

        /// Return the description untruncated
        #[arg(long)]
        full_text: bool,
    },

    /// List live items that are streaming now
    Live {
        /// Maximum number of live items (at most 99)
        #[arg(short, long)]
        max: Option<u32>,
    },

    /// Search podcasts
    Search {
        /// Search term
        term: String,

        /// What to match the term against
        #[arg(long, value_enum, default_value_t = SearchBy::Term)]
        by: SearchBy,

        /// Maximum number of podcasts (at most 99)
        #[arg(short, long)]
        max: Option<u32>,

        /// Leave out podcasts marked explicit
        #[arg(long)]
        clean: bool,

        /// Return descriptions untruncated
        #[arg(long)]
        full_text: bool,

        /// Include fuzzy matches
        #[arg(long)]
        similar: bool,

        /// Only podcasts with an Apple Podcasts id
        #[arg(long)]
        ap_only: bool,

        /// Only podcasts with value-for-value metadata of this type
        #[arg(long, value_name = "TYPE")]
        value: Option<ValueType>,
    },

    /// List all categories
    Categories,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum SearchBy {
    /// Title, author or owner
    #[default]
    Term,
    /// Title only
    Title,
    /// People mentioned in the feed
    Person,
    /// Music feeds by term
    Music,
}

/// Sets up `env_logger`.
///
/// `-q` and `-v` win over `RUST_LOG`, which wins over the `info` default.
///
/// # Panics
///
/// Panics if a logger was already set.
fn init_logger(args: &Args) {
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if args.quiet || args.verbose > 0 {
        let level = match args.verbose {
            // Quiet and verbose are mutually exclusive.
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Only for this crate; dependencies keep the RUST_LOG level.
        logger.filter_module(module_path!(), level);
    }

    logger.init();
}

/// Loads the API credentials from a file.
///
/// # Errors
///
/// Will return `Err` if the file cannot be read or has no valid
/// credentials.
fn load_credentials(secrets_file: &Path) -> io::Result<Credentials> {
    let credentials = Credentials::from_file(secrets_file);

    if let Err(ref e) = credentials {
        if e.kind() == io::ErrorKind::NotFound {
            info!(
                "copy secrets.toml.example to {} and fill in your API key and secret",
                secrets_file.display()
            );
        }
    }

    credentials
}

/// Prints a value as pretty JSON on standard output.
fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs the requested command.
///
/// # Errors
///
/// Will return `Err` if the credentials cannot be loaded, the request fails
/// or the result cannot be printed.
async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let credentials = load_credentials(&args.secrets_file)?;

    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let mut config = Config::new(credentials)
        .with_base_url(args.base_url)
        .with_timeout(timeout);
    if let Some(user_agent) = args.user_agent {
        config = config.with_user_agent(user_agent);
    }

    let client = Client::new(&config)?;

    match args.command {
        Command::Podcast {
            id,
            guid,
            itunes_id,
            url,
        } => {
            let podcast = if let Some(id) = id {
                client.podcast_by_feed_id(id).await?
            } else if let Some(guid) = guid {
                client.podcast_by_guid(&guid).await?
            } else if let Some(itunes_id) = itunes_id {
                client.podcast_by_itunes_id(&itunes_id).await?
            } else if let Some(url) = url {
                client.podcast_by_feed_url(&url).await?
            } else {
                None
            };

            match podcast {
                Some(podcast) => print_json(&podcast)?,
                None => info!("no podcast found"),
            }
        }

        Command::Episodes {
            feed_id,
            max,
            full_text,
        } => {
            let options = EpisodesOptions { max, full_text };
            print_json(&client.episodes_by_feed_id(feed_id, options).await?)?;
        }

        Command::Episode { id, full_text } => match client.episode_by_id(id, full_text).await? {
            Some(episode) => print_json(&episode)?,
            None => info!("no episode found"),
        },

        Command::Live { max } => {
            print_json(&client.live_episodes(LiveEpisodesOptions { max }).await?)?;
        }

        Command::Search {
            term,
            by,
            max,
            clean,
            full_text,
            similar,
            ap_only,
            value,
        } => {
            let podcasts = match by {
                SearchBy::Term => {
                    let options = SearchByTermOptions {
                        max,
                        clean,
                        full_text,
                        ap_only,
                        similar,
                        value,
                    };
                    client.search_by_term(&term, options).await?
                }
                SearchBy::Title => {
                    let options = SearchByTitleOptions {
                        max,
                        clean,
                        full_text,
                        similar,
                        value,
                    };
                    client.search_by_title(&term, options).await?
                }
                SearchBy::Person => {
                    let options = SearchByPersonOptions { max, full_text };
                    client.search_by_person(&term, options).await?
                }
                SearchBy::Music => {
                    let options = MusicSearchOptions {
                        max,
                        clean,
                        full_text,
                        ap_only,
                        value,
                    };
                    client.search_music_by_term(&term, options).await?
                }
            };

            print_json(&podcasts)?;
        }

        Command::Categories => print_json(&client.categories().await?)?,
    }

    Ok(())
}

/// Parses arguments, sets up logging and runs the command, exiting with
/// status 1 on failure.
#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(&args);

    debug!("{args:#?}");

    let cmd = command!();
    debug!(
        "{} {} ({BUILD_PROFILE})",
        cmd.get_name(),
        cmd.get_version().unwrap_or("unknown")
    );

    if let Err(e) = run(args).await {
        error!("{e}");
        process::exit(1);
    }
}
