//! Value-for-value payment metadata.
//!
//! Feeds and episodes may describe how listeners can pay the people behind
//! them, following the `podcast:value` tag. The split percentages and
//! addresses come from the feed and are passed through as reported.
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "model": { "type": "lightning", "method": "keysend", "suggested": "0.00000005000" },
//!     "destinations": [
//!         { "name": "Host", "address": "03ae9f...", "type": "node", "split": 99 },
//!         { "name": "Podcastindex.org", "address": "03ae9f...", "type": "node", "split": 1, "fee": true }
//!     ]
//! }
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};

use crate::protocol::codec::BoolOrInt;

/// Payment descriptor of a feed or episode.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub model: Model,
    /// Recipients in feed order.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

/// How payments are made.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Model {
    /// Payment layer, e.g. `lightning`.
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub kind: String,

    /// Transport method, e.g. `keysend`.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub method: String,

    /// Suggested amount per minute, as written in the feed.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub suggested: String,
}

/// One recipient of a split payment.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub address: String,

    /// Address type, e.g. `node`.
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub kind: String,

    /// Share of the payment. Not validated against the other shares.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub split: u64,

    /// Whether this split is a fee taken before the others.
    #[serde_as(as = "Option<BoolOrInt>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_value: Option<String>,
}

/// Payment layer filter for searches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    /// Any payment layer.
    #[default]
    Any,
    Lightning,
    Hive,
    WebMonetization,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Lightning => write!(f, "lightning"),
            Self::Hive => write!(f, "hive"),
            Self::WebMonetization => write!(f, "webmonetization"),
        }
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value_type = match s.to_ascii_lowercase().as_str() {
            "any" => Self::Any,
            "lightning" => Self::Lightning,
            "hive" => Self::Hive,
            "webmonetization" => Self::WebMonetization,
            _ => return Err(format!("unknown value type: {s}")),
        };

        Ok(value_type)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_destinations_in_order() {
        let json = r#"{
            "model": {"type": "lightning", "method": "keysend", "suggested": "0.00000005000"},
            "destinations": [
                {"name": "Host", "address": "abc", "type": "node", "split": 99},
                {"name": "Index", "address": "def", "type": "node", "split": "1", "fee": 1,
                 "customKey": "696969", "customValue": "xyz"}
            ]
        }"#;

        let value: Value = serde_json::from_str(json).unwrap();
        assert_eq!(value.model.kind, "lightning");
        assert_eq!(value.model.method, "keysend");
        assert_eq!(value.destinations.len(), 2);
        assert_eq!(value.destinations[0].name, "Host");
        assert_eq!(value.destinations[0].fee, None);
        assert_eq!(value.destinations[1].split, 1);
        assert_eq!(value.destinations[1].fee, Some(true));
        assert_eq!(value.destinations[1].custom_key.as_deref(), Some("696969"));
    }

    #[test]
    fn splits_survive_round_trip() {
        let value = Value {
            model: Model {
                kind: "lightning".to_string(),
                method: "keysend".to_string(),
                suggested: "0.00000005000".to_string(),
            },
            destinations: vec![Destination {
                name: "Host".to_string(),
                address: "abc".to_string(),
                kind: "node".to_string(),
                split: 150,
                ..Default::default()
            }],
        };

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);
    }

    #[test]
    fn missing_model_is_empty() {
        let value: Value =
            serde_json::from_str(r#"{"destinations": [{"address": "abc", "split": 100}]}"#).unwrap();
        assert_eq!(value.model, Model::default());
        assert_eq!(value.destinations.len(), 1);

        let value: Value = serde_json::from_str(r#"{"model": null}"#).unwrap();
        assert_eq!(value.model, Model::default());
    }

    #[test]
    fn value_type_names() {
        assert_eq!(ValueType::WebMonetization.to_string(), "webmonetization");
        assert_eq!("Lightning".parse::<ValueType>().unwrap(), ValueType::Lightning);
        assert!("bitcoin".parse::<ValueType>().is_err());
    }
}
