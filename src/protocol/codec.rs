//! Building blocks for tolerant decoding of the Podcast Index wire format.
//!
//! The API is loosely typed. The same flag may arrive as `0`/`1` in one
//! response and as `true`/`false` in the next, URLs may be empty strings,
//! and "not found" is an empty array where an object was expected. The
//! helpers here absorb these irregularities so the domain types never see
//! them:
//!
//! * [`BoolOrInt`] - `serde_with` adapter for integer-or-boolean flags
//! * [`parse_link`] / [`link_string`] - URL fields with named errors
//! * [`found`] - envelope fields that may hold an empty placeholder
//! * [`clamp_max`] - upper bound on requested result counts

use std::fmt;

use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer, Serializer,
};
use serde_with::{DeserializeAs, SerializeAs};

use crate::{
    error::FieldError,
    link::{Link, LinkError},
};

/// Largest result count the API accepts for `max`.
pub const MAX_RESULTS: u32 = 99;

/// Adapter for flags sent either as JSON booleans or as integers.
///
/// Decodes `true`/`false` as is and integers as "non-zero is true". JSON
/// `null` decodes as `false`. Any other JSON type is a type mismatch.
/// Encodes as `0` or `1`, which is what the API itself sends for most
/// flags.
///
/// # Example
///
/// ```ignore
/// #[serde_as]
/// #[derive(Deserialize)]
/// struct Feed {
///     #[serde_as(as = "BoolOrInt")]
///     dead: bool,
/// }
/// ```
pub struct BoolOrInt;

impl<'de> DeserializeAs<'de, bool> for BoolOrInt {
    fn deserialize_as<D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = bool;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or an integer")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(value)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(value != 0)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(value != 0)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(false)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(false)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl SerializeAs<bool> for BoolOrInt {
    fn serialize_as<S>(source: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*source))
    }
}

/// Parses an optional URL field.
///
/// Absent, `null` and empty strings all mean "no URL". Relative references
/// are kept as written.
///
/// # Errors
///
/// Returns a [`FieldError`] naming `field` and the raw value if the string
/// is not a URL reference at all, such as `:invalid`.
pub fn parse_link(field: &'static str, raw: Option<String>) -> Result<Option<Link>, FieldError> {
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e: LinkError| FieldError::new(field, s, e)),
    }
}

/// Formats a URL field that the API always sends, using an empty string
/// for "no URL".
#[must_use]
pub fn link_string(link: Option<&Link>) -> Option<String> {
    Some(link.map(Link::to_string).unwrap_or_default())
}

/// Returns the text if it is not empty.
#[must_use]
pub fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Deserializes an envelope field that holds a single entity, or a
/// placeholder when there is none.
///
/// Not-found lookups are answered with `200 OK` and an empty array, an
/// empty object or `null` in place of the entity. These all become `None`.
///
/// # Errors
///
/// Returns an error if the field holds something other than a placeholder
/// that does not decode as `T`.
pub fn found<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let placeholder = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(fields) => fields.is_empty(),
        _ => false,
    };

    if placeholder {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(de::Error::custom)
}

/// Bounds a requested result count.
///
/// `None` and `0` leave the choice to the server. Anything above
/// [`MAX_RESULTS`] is lowered to it.
#[must_use]
pub fn clamp_max(max: Option<u32>) -> Option<u32> {
    max.filter(|&n| n > 0).map(|n| n.min(MAX_RESULTS))
}

/// Implements `Serialize` and `Deserialize` for a domain type by way of
/// its wire type.
///
/// Decoding reads the wire type and converts with `TryFrom<Wire>`.
/// Encoding converts with `TryFrom<&Domain>` and writes the wire type.
/// Conversion failures surface as (de)serialization errors carrying the
/// field error text.
macro_rules! via_wire {
    ($domain:ty, $wire:ty) => {
        impl ::serde::Serialize for $domain {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let wire = <$wire>::try_from(self).map_err(::serde::ser::Error::custom)?;
                ::serde::Serialize::serialize(&wire, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $domain {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let wire = <$wire as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(wire).map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use via_wire;
