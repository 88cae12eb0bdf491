//! Links found in feeds.
//!
//! Feeds are written by hand or by tools of varying quality, so the links
//! they carry are not always absolute URLs. A [`Link`] keeps absolute URLs
//! parsed and holds relative references (`/artwork.jpg`, `www.example.com`)
//! verbatim, rejecting only text that cannot be a URL reference at all.

use std::{fmt, str::FromStr};

use thiserror::Error;
use url::Url;

/// An absolute URL or a relative reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    Absolute(Url),
    /// Kept as written; there is no base to resolve it against.
    Relative(String),
}

/// Why text is not a URL reference.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error("missing protocol scheme")]
    MissingScheme,

    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,

    #[error("invalid control character in URL")]
    ControlCharacter,

    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
}

impl Link {
    /// Returns the parsed URL if the link is absolute.
    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Absolute(url) => Some(url),
            Self::Relative(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Absolute(url) => url.as_str(),
            Self::Relative(reference) => reference,
        }
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }

    /// Checks a reference without a scheme.
    fn relative(s: &str) -> Result<Self, LinkError> {
        if s.chars().any(|c| c.is_ascii_control()) {
            return Err(LinkError::ControlCharacter);
        }

        if s.starts_with(':') {
            return Err(LinkError::MissingScheme);
        }

        let path = s.split(['?', '#']).next().unwrap_or_default();
        if !path.starts_with('/') {
            let first_segment = path.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                return Err(LinkError::ColonInFirstSegment);
            }
        }

        if let Some(escape) = invalid_escape(path) {
            return Err(LinkError::InvalidEscape(escape.to_owned()));
        }

        Ok(Self::Relative(s.to_owned()))
    }
}

/// Returns the first `%` sequence in `s` that is not followed by two hex
/// digits.
fn invalid_escape(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'%' {
            continue;
        }

        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Some(s.get(i..(i + 3).min(s.len())).unwrap_or("%"));
        }
    }

    None
}

impl FromStr for Link {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Url::parse(s) {
            Ok(url) => Ok(Self::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => Self::relative(s),
            Err(e) => Err(e.into()),
        }
    }
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        Self::Absolute(url)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_are_parsed() {
        let link: Link = "https://www.theincomparable.com/batmanuniversity/"
            .parse()
            .unwrap();
        assert!(link.is_absolute());
        assert_eq!(link.as_url().unwrap().host_str(), Some("www.theincomparable.com"));
    }

    #[test]
    fn relative_references_are_kept() {
        for s in [
            "www.example.com",
            "/batman",
            "images/logo.png?size=3x",
            "//cdn.example.com/a.mp3",
        ] {
            let link: Link = s.parse().unwrap();
            assert_eq!(link, Link::Relative(s.to_owned()));
            assert_eq!(link.to_string(), s);
        }
    }

    #[test]
    fn rejects_what_cannot_be_a_reference() {
        assert_eq!(":invalid".parse::<Link>(), Err(LinkError::MissingScheme));
        assert_eq!(
            "invalid url ://".parse::<Link>(),
            Err(LinkError::ColonInFirstSegment)
        );
        assert_eq!("/a\nb".parse::<Link>(), Err(LinkError::ControlCharacter));
        assert_eq!(
            "/100%zz".parse::<Link>(),
            Err(LinkError::InvalidEscape("%zz".to_owned()))
        );
        assert_eq!(
            "/100%".parse::<Link>(),
            Err(LinkError::InvalidEscape("%".to_owned()))
        );
        assert!("http://exa mple.com/".parse::<Link>().is_err());
    }

    #[test]
    fn colon_after_first_segment_is_allowed() {
        let link: Link = "/podcasts/a:b".parse().unwrap();
        assert!(!link.is_absolute());
    }
}
