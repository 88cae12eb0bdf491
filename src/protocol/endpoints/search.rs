//! Feed searches.
//!
//! Searches return at most ten feeds unless asked for more. Flags are sent
//! as bare keys (`clean=`), except `aponly`, which the API expects as
//! `aponly=true`.

use super::{Endpoint, FeedsResponse};
use crate::{protocol::query::Query, value::ValueType};

/// Result count when none is requested.
pub const DEFAULT_MAX: u32 = 10;

/// Starts a search query for `term`.
fn search_query(term: &str, max: Option<u32>, full_text: bool) -> Query {
    let mut query = Query::new();
    query
        .set("q", term)
        .set("max", DEFAULT_MAX)
        .max(max)
        .flag("fulltext", full_text);
    query
}

/// Options of [`ByTerm`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchByTermOptions {
    /// Maximum number of feeds, at most 99. Defaults to 10.
    pub max: Option<u32>,
    /// Leave out feeds marked explicit.
    pub clean: bool,
    /// Return descriptions untruncated.
    pub full_text: bool,
    /// Only feeds with an Apple Podcasts id.
    pub ap_only: bool,
    /// Include fuzzy matches.
    pub similar: bool,
    /// Only feeds with value-for-value metadata of this type.
    pub value: Option<ValueType>,
}

/// Feeds matching a term in title, author or owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByTerm {
    pub term: String,
    pub options: SearchByTermOptions,
}

impl Endpoint for ByTerm {
    const PATH: &'static str = "search/byterm";
    type Response = FeedsResponse;

    fn query(&self) -> Query {
        let options = &self.options;
        let mut query = search_query(&self.term, options.max, options.full_text);
        query.flag("clean", options.clean).flag("similar", options.similar);
        if options.ap_only {
            query.set("aponly", true);
        }
        if let Some(value) = options.value {
            query.set("val", value);
        }
        query
    }
}

/// Options of [`ByTitle`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchByTitleOptions {
    /// Maximum number of feeds, at most 99. Defaults to 10.
    pub max: Option<u32>,
    /// Leave out feeds marked explicit.
    pub clean: bool,
    /// Return descriptions untruncated.
    pub full_text: bool,
    /// Include fuzzy matches.
    pub similar: bool,
    /// Only feeds with value-for-value metadata of this type.
    pub value: Option<ValueType>,
}

/// Feeds matching a term in their title.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByTitle {
    pub title: String,
    pub options: SearchByTitleOptions,
}

impl Endpoint for ByTitle {
    const PATH: &'static str = "search/bytitle";
    type Response = FeedsResponse;

    fn query(&self) -> Query {
        let options = &self.options;
        let mut query = search_query(&self.title, options.max, options.full_text);
        query.flag("clean", options.clean).flag("similar", options.similar);
        if let Some(value) = options.value {
            query.set("val", value);
        }
        query
    }
}

/// Options of [`ByPerson`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchByPersonOptions {
    /// Maximum number of feeds, at most 99. Defaults to 10.
    pub max: Option<u32>,
    /// Return descriptions untruncated.
    pub full_text: bool,
}

/// Feeds mentioning a person as host, guest or author.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByPerson {
    pub person: String,
    pub options: SearchByPersonOptions,
}

impl Endpoint for ByPerson {
    const PATH: &'static str = "search/byperson";
    type Response = FeedsResponse;

    fn query(&self) -> Query {
        search_query(&self.person, self.options.max, self.options.full_text)
    }
}

/// Options of [`MusicByTerm`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MusicSearchOptions {
    /// Maximum number of feeds, at most 99. Defaults to 10.
    pub max: Option<u32>,
    /// Leave out feeds marked explicit.
    pub clean: bool,
    /// Return descriptions untruncated.
    pub full_text: bool,
    /// Only feeds with an Apple Podcasts id.
    pub ap_only: bool,
    /// Only feeds with value-for-value metadata of this type.
    pub value: Option<ValueType>,
}

/// Music feeds (`podcast:medium` of `music`) matching a term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MusicByTerm {
    pub term: String,
    pub options: MusicSearchOptions,
}

impl Endpoint for MusicByTerm {
    const PATH: &'static str = "search/music/byterm";
    type Response = FeedsResponse;

    fn query(&self) -> Query {
        let options = &self.options;
        let mut query = search_query(&self.term, options.max, options.full_text);
        query.flag("clean", options.clean);
        if options.ap_only {
            query.set("aponly", true);
        }
        if let Some(value) = options.value {
            query.set("val", value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ten_results() {
        let request = ByTitle {
            title: "batman university".to_string(),
            options: SearchByTitleOptions::default(),
        };
        assert_eq!(request.query().encode(), "max=10&q=batman+university");
    }

    #[test]
    fn term_search_with_all_options() {
        let request = ByTerm {
            term: "bitcoin".to_string(),
            options: SearchByTermOptions {
                max: Some(1000),
                clean: true,
                full_text: true,
                ap_only: true,
                similar: true,
                value: Some(ValueType::Lightning),
            },
        };
        assert_eq!(
            request.query().encode(),
            "aponly=true&clean=&fulltext=&max=99&q=bitcoin&similar=&val=lightning"
        );
    }

    #[test]
    fn person_search_ignores_zero_max() {
        let request = ByPerson {
            person: "adam curry".to_string(),
            options: SearchByPersonOptions {
                max: Some(0),
                full_text: false,
            },
        };
        assert_eq!(request.query().encode(), "max=10&q=adam+curry");
    }

    #[test]
    fn music_search_filters_value() {
        let request = MusicByTerm {
            term: "able kirby".to_string(),
            options: MusicSearchOptions {
                value: Some(ValueType::Any),
                ..Default::default()
            },
        };
        assert_eq!(request.query().encode(), "max=10&q=able+kirby&val=any");
    }
}
