//! Lenient integer deserializers
//!
//! The API sometimes serializes whole numbers as floats (`92.0`). Integer
//! fields accept those, but still reject a float with a fractional part.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use std::fmt;

struct IntegralVisitor;

impl<'de> Visitor<'de> for IntegralVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a float with no fractional part")
    }

    fn visit_i64<E>(self, value: i64) -> Result<i64, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<i64, E>
    where
        E: de::Error,
    {
        i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E>(self, value: f64) -> Result<i64, E>
    where
        E: de::Error,
    {
        // i64::MAX as f64 rounds up to 2^63, which is out of range
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        if value.is_finite() && value.fract() == 0.0 && in_range {
            Ok(value as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(value), &self))
        }
    }
}

struct OptionalIntegralVisitor;

impl<'de> Visitor<'de> for OptionalIntegralVisitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, an integer or a float with no fractional part")
    }

    fn visit_none<E>(self) -> Result<Option<i64>, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Option<i64>, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        integral(deserializer).map(Some)
    }
}

/// Deserialize an `i64`, accepting whole-number floats
pub(crate) fn integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntegralVisitor)
}

/// Optional variant of [`integral`]; pair it with `#[serde(default)]`
pub(crate) fn integral_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalIntegralVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "integral")]
        count: i64,
        #[serde(default, deserialize_with = "integral_opt")]
        extra: Option<i64>,
    }

    fn sample(value: serde_json::Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_integral_accepts_integers_and_whole_floats() {
        assert_eq!(sample(json!({"count": 92})).unwrap().count, 92);
        assert_eq!(sample(json!({"count": -3})).unwrap().count, -3);
        assert_eq!(sample(json!({"count": 92.0})).unwrap().count, 92);
        assert_eq!(sample(json!({"count": 1705276800.0})).unwrap().count, 1_705_276_800);
    }

    #[test]
    fn test_integral_rejects_fractions_and_non_numbers() {
        for bad in [json!(92.5), json!(-0.1), json!("92"), json!(null), json!(u64::MAX)] {
            let err = sample(json!({"count": bad})).unwrap_err();
            assert_eq!(err.classify(), serde_json::error::Category::Data);
        }
        assert!(sample(json!({"count": 1e300})).is_err());
    }

    #[test]
    fn test_integral_from_text() {
        let parsed: Sample = serde_json::from_str(r#"{"count": 200.0, "extra": 7.0}"#).unwrap();
        assert_eq!(parsed.count, 200);
        assert_eq!(parsed.extra, Some(7));
    }

    #[test]
    fn test_integral_opt() {
        assert_eq!(sample(json!({"count": 1})).unwrap().extra, None);
        assert_eq!(sample(json!({"count": 1, "extra": null})).unwrap().extra, None);
        assert_eq!(sample(json!({"count": 1, "extra": 4.0})).unwrap().extra, Some(4));
        assert!(sample(json!({"count": 1, "extra": 4.5})).is_err());
    }
}
