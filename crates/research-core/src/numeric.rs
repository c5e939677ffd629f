//! Lenient numeric decoding for vendor payloads.
//!
//! Statement line items arrive as JSON strings (`"1234"`), numbers, `null`,
//! empty strings, or placeholders such as `"None"`. All of them decode to an
//! `Option<f64>`; anything that is not a finite number becomes `None`.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Parses a numeric string, returning `None` for blanks, vendor
/// placeholders and anything that is not a finite number.
#[must_use]
pub fn parse_lenient(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("null") {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Serde `deserialize_with` helper for `Option<f64>` fields that may be
/// encoded as strings or numbers.
///
/// Combine with `#[serde(default)]` so a missing key also yields `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientF64Visitor)
}

struct LenientF64Visitor;

impl<'de> Visitor<'de> for LenientF64Visitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v).filter(|v| v.is_finite()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_lenient(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(Self)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Line {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: Option<f64>,
    }

    fn decode(json: &str) -> Option<f64> {
        serde_json::from_str::<Line>(json).unwrap().value
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient(" 42.5 "), Some(42.5));
        assert_eq!(parse_lenient("-7"), Some(-7.0));
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("None"), None);
        assert_eq!(parse_lenient("abc"), None);
        assert_eq!(parse_lenient("NaN"), None);
    }

    #[test]
    fn test_lenient_deserialization() {
        assert_eq!(decode(r#"{"value": "1000"}"#), Some(1000.0));
        assert_eq!(decode(r#"{"value": 12.5}"#), Some(12.5));
        assert_eq!(decode(r#"{"value": -3}"#), Some(-3.0));
        assert_eq!(decode(r#"{"value": ""}"#), None);
        assert_eq!(decode(r#"{"value": null}"#), None);
        assert_eq!(decode(r#"{"value": "None"}"#), None);
        assert_eq!(decode(r#"{"value": true}"#), None);
        assert_eq!(decode(r#"{}"#), None);
    }
}
