//! Request signing for the Podcast Index API.
//!
//! Every request presents the API key together with a timestamp and a
//! SHA-1 digest of key, secret and timestamp. The digest is recomputed for
//! every request because it depends on the current time:
//!
//! ```text
//! User-Agent:    SuperPodcastPlayer/1.3
//! X-Auth-Key:    UXKCGDSYGUUEVQJSYDZH
//! X-Auth-Date:   1700000000
//! Authorization: sha1(X-Auth-Key ‖ secret ‖ X-Auth-Date), lowercase hex
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use sha1::{Digest, Sha1};
use veil::Redact;

use crate::{config::Credentials, error::Result};

/// Name of the header carrying the API key.
pub const X_AUTH_KEY: HeaderName = HeaderName::from_static("x-auth-key");

/// Name of the header carrying the signing timestamp.
pub const X_AUTH_DATE: HeaderName = HeaderName::from_static("x-auth-date");

/// Header values that authenticate a single request.
#[derive(Clone, Redact, PartialEq, Eq, Hash)]
pub struct AuthHeaders {
    pub user_agent: String,
    pub api_key: String,
    /// Unix timestamp in seconds, as a decimal string.
    pub date: String,
    #[redact]
    pub authorization: String,
}

impl AuthHeaders {
    /// Signs for the given Unix timestamp.
    #[must_use]
    pub fn new(user_agent: &str, credentials: &Credentials, timestamp: u64) -> Self {
        let date = timestamp.to_string();
        let authorization = authorization(&credentials.api_key, &credentials.api_secret, &date);

        Self {
            user_agent: user_agent.to_owned(),
            api_key: credentials.api_key.clone(),
            date,
            authorization,
        }
    }

    /// Signs for the current system time.
    #[must_use]
    pub fn now(user_agent: &str, credentials: &Credentials) -> Self {
        Self::new(user_agent, credentials, now_from_epoch())
    }

    /// Inserts the four authentication headers, replacing earlier values.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the user agent or API key are not valid header
    /// values, for example because they contain control characters.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(X_AUTH_KEY, HeaderValue::from_str(&self.api_key)?);
        headers.insert(X_AUTH_DATE, HeaderValue::from_str(&self.date)?);

        let mut authorization = HeaderValue::from_str(&self.authorization)?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        Ok(())
    }
}

/// Current system time in seconds from epoch.
///
/// # Panics
///
/// Panics if the system time is before epoch.
fn now_from_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time is before epoch")
        .as_secs()
}

/// Computes the `Authorization` value: the lowercase hexadecimal SHA-1
/// digest of key, secret and date concatenated without separators.
#[must_use]
pub fn authorization(api_key: &str, api_secret: &str, date: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(api_key.as_bytes());
    hasher.update(api_secret.as_bytes());
    hasher.update(date.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_key_secret_and_date() {
        assert_eq!(
            authorization(
                "UXKCGDSYGUUEVQJSYDZH",
                "yzJe2eE7XV-3eY576dyRZ6wXyAbndh6LUrCZ8KN|",
                "1700000000"
            ),
            "c75e70335187b65588b2c46e98691f5e9d5850af"
        );
    }

    #[test]
    fn headers_carry_decimal_timestamp() {
        let credentials = Credentials::new("key", "secret");
        let headers = AuthHeaders::new("TestPlayer/1.0", &credentials, 0);
        assert_eq!(headers.date, "0");
        assert_eq!(headers.api_key, "key");
        assert_eq!(
            headers.authorization,
            "2fa7bc308a4de4eb9952552dbda4115f7985b603"
        );
    }

    #[test]
    fn applies_all_headers() {
        let credentials = Credentials::new("key", "secret");
        let mut map = HeaderMap::new();
        AuthHeaders::new("TestPlayer/1.0", &credentials, 0)
            .apply(&mut map)
            .unwrap();

        assert_eq!(map[USER_AGENT], "TestPlayer/1.0");
        assert_eq!(map[X_AUTH_KEY], "key");
        assert_eq!(map[X_AUTH_DATE], "0");
        assert!(map[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn rejects_control_characters() {
        let credentials = Credentials::new("key\n", "secret");
        let mut map = HeaderMap::new();
        assert!(AuthHeaders::new("TestPlayer/1.0", &credentials, 0)
            .apply(&mut map)
            .is_err());
    }

    #[test]
    fn redacts_authorization() {
        let credentials = Credentials::new("key", "secret");
        let headers = AuthHeaders::new("TestPlayer/1.0", &credentials, 0);
        assert!(!format!("{headers:?}").contains("2fa7bc30"));
    }
}
