//! Lenient number parsing for values that arrive as strings (query strings, path segments).

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

pub const NOT_A_NUMBER: &str = "Expected number, received nan";
pub const NOT_AN_INTEGER: &str = "Expected integer, received float";

/// Parse a trimmed decimal integer; an empty string counts as zero.
pub fn parse_integer(raw: &str) -> Result<i64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Ok(n);
    }

    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Err(NOT_AN_INTEGER),
        _ => Err(NOT_A_NUMBER),
    }
}

/// `deserialize_with` helper accepting a JSON integer or a numeric string.
///
/// Pair with `#[serde(default)]` so an absent field becomes `None`.
pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalI64Visitor)
}

struct OptionalI64Visitor;

impl<'de> Visitor<'de> for OptionalI64Visitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::custom("Number is too large"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v.is_finite() {
            Ok(Some(v as i64))
        } else {
            Err(E::custom(NOT_AN_INTEGER))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_integer(v).map(Some).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Page {
        #[serde(default, deserialize_with = "optional_i64")]
        page: Option<i64>,
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer(" 12 "), Ok(12));
        assert_eq!(parse_integer(""), Ok(0));
        assert_eq!(parse_integer("-3"), Ok(-3));
        assert_eq!(parse_integer("1.5"), Err(NOT_AN_INTEGER));
        assert_eq!(parse_integer("abc"), Err(NOT_A_NUMBER));
    }

    #[test]
    fn test_optional_i64_accepts_strings_and_numbers() {
        let page: Page = serde_json::from_value(json!({ "page": "2" })).unwrap();
        assert_eq!(page.page, Some(2));

        let page: Page = serde_json::from_value(json!({ "page": 3 })).unwrap();
        assert_eq!(page.page, Some(3));

        let page: Page = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page.page, None);

        let page: Page = serde_json::from_value(json!({ "page": null })).unwrap();
        assert_eq!(page.page, None);
    }

    #[test]
    fn test_optional_i64_rejects_garbage() {
        let err = serde_json::from_value::<Page>(json!({ "page": "two" })).unwrap_err();
        assert!(err.to_string().contains(NOT_A_NUMBER));
    }
}
