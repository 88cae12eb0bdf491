//! Query parameters of API requests.
//!
//! Parameters form an ordered multimap: a key may repeat, and a key with an
//! empty value expresses a flag (`fulltext=`). Keys are encoded in
//! lexicographic order so that identical queries produce identical URLs.

use std::{collections::BTreeMap, fmt};

use url::form_urlencoded;

use super::codec::clamp_max;

/// Query parameters of a request.
///
/// # Example
///
/// ```ignore
/// let mut query = Query::new();
/// query.set("query", "test search").set("max", 10).set("lang", "en");
/// assert_eq!(query.encode(), "lang=en&max=10&query=test+search");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, Vec<String>>);

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to a single value, replacing any earlier values.
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.0.insert(key.to_owned(), vec![value.to_string()]);
        self
    }

    /// Appends a value to `key`.
    pub fn add(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.0
            .entry(key.to_owned())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Appends `key` without a value if `enabled`.
    pub fn flag(&mut self, key: &str, enabled: bool) -> &mut Self {
        if enabled {
            self.add(key, "");
        }
        self
    }

    /// Sets `max` to the bounded result count, if one was requested.
    pub fn max(&mut self, max: Option<u32>) -> &mut Self {
        if let Some(max) = clamp_max(max) {
            self.set("max", max);
        }
        self
    }

    /// Returns the first value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes as `application/x-www-form-urlencoded`, keys sorted.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: AsRef<str>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.add(key.as_ref(), value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_sorted() {
        let mut query = Query::new();
        query
            .set("query", "test search")
            .set("max", 10)
            .set("lang", "en");
        assert_eq!(query.encode(), "lang=en&max=10&query=test+search");
    }

    #[test]
    fn flags_have_empty_values() {
        let mut query = Query::new();
        query.set("q", "batman").flag("fulltext", true).flag("clean", false);
        assert_eq!(query.encode(), "fulltext=&q=batman");
    }

    #[test]
    fn keys_may_repeat() {
        let query: Query = [("cat", "1"), ("cat", "2")].into_iter().collect();
        assert_eq!(query.encode(), "cat=1&cat=2");
        assert_eq!(query.get("cat"), Some("1"));
    }

    #[test]
    fn set_replaces() {
        let mut query = Query::new();
        query.set("max", 10).max(Some(1000));
        assert_eq!(query.get("max"), Some("99"));
    }

    #[test]
    fn zero_max_is_omitted() {
        let mut query = Query::new();
        query.max(Some(0)).max(None);
        assert!(query.is_empty());
    }

    #[test]
    fn escapes_reserved_characters() {
        let mut query = Query::new();
        query.set("url", "https://example.com/feed?a=b&c");
        assert_eq!(
            query.encode(),
            "url=https%3A%2F%2Fexample.com%2Ffeed%3Fa%3Db%26c"
        );
    }
}
