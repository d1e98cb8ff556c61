//! 宽松的数值反序列化
//!
//! 前端表单把数字字段（年级、专业 ID、分数）作为字符串提交，
//! 这里同时接受 JSON 数字与数字字符串；空字符串与 null 视为缺失。

use serde::Deserializer;
use serde::de::{Error, Unexpected, Visitor};
use std::fmt;

struct OptionalI64Visitor;

impl<'de> Visitor<'de> for OptionalI64Visitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer, a string containing an integer, or null")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        if value <= i64::MAX as u64 {
            Ok(Some(value as i64))
        } else {
            Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
        }
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        // 只接受没有小数部分的浮点数（如 85.0）
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            Ok(Some(value as i64))
        } else {
            Err(Error::invalid_value(Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

/// 反序列化为 `Option<i64>`，配合 `#[serde(default)]` 使用
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalI64Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        value: Option<i64>,
    }

    fn probe(json: &str) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_str::<Probe>(json).map(|p| p.value)
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        assert_eq!(probe(r#"{"value": 3}"#).unwrap(), Some(3));
        assert_eq!(probe(r#"{"value": "3"}"#).unwrap(), Some(3));
        assert_eq!(probe(r#"{"value": " 42 "}"#).unwrap(), Some(42));
        assert_eq!(probe(r#"{"value": 85.0}"#).unwrap(), Some(85));
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(probe(r#"{}"#).unwrap(), None);
        assert_eq!(probe(r#"{"value": null}"#).unwrap(), None);
        assert_eq!(probe(r#"{"value": ""}"#).unwrap(), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(probe(r#"{"value": "abc"}"#).is_err());
        assert!(probe(r#"{"value": 85.5}"#).is_err());
        assert!(probe(r#"{"value": true}"#).is_err());
    }
}
