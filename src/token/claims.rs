//! Opaque claim set carried by a session token.
//! Used by: token::sign, token::verify, token::codec.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

pub const ISSUED_AT: &str = "iat";
pub const EXPIRES_AT: &str = "exp";

/// Caller payload plus the `iat`/`exp` fields the codec manages.
///
/// No schema is enforced. Values are anything JSON can hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Serializes any value into a claim set. Only JSON objects qualify.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(Error::Encoding(format!(
                "claims must serialize to a JSON object, got {}",
                json_type(&other)
            ))),
            Err(e) => Err(Error::Encoding(e.to_string())),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.get(ISSUED_AT).and_then(from_numeric_date)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.get(EXPIRES_AT).and_then(from_numeric_date)
    }

    /// The caller's original payload, with `iat` and `exp` removed.
    pub fn without_reserved(mut self) -> Self {
        self.0.remove(ISSUED_AT);
        self.0.remove(EXPIRES_AT);
        self
    }

    /// Overwrites the reserved timestamps, whatever the caller put there.
    pub(crate) fn stamp(&mut self, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) {
        self.0.insert(ISSUED_AT.into(), to_numeric_date(issued_at));
        self.0.insert(EXPIRES_AT.into(), to_numeric_date(expires_at));
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Claims {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// RFC 7519 NumericDate: integer seconds, or fractional seconds when the
/// instant has a millisecond component.
pub(crate) fn to_numeric_date(instant: DateTime<Utc>) -> Value {
    let millis = instant.timestamp_millis();
    if millis % 1000 == 0 {
        return Value::from(millis / 1000);
    }
    Number::from_f64(millis as f64 / 1000.0)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(millis.div_euclid(1000)))
}

pub(crate) fn from_numeric_date(value: &Value) -> Option<DateTime<Utc>> {
    let millis = match value.as_i64() {
        Some(secs) => secs.checked_mul(1000)?,
        None => {
            let secs = value.as_f64()?;
            if !secs.is_finite() {
                return None;
            }
            (secs * 1000.0).round() as i64
        }
    };
    DateTime::from_timestamp_millis(millis)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, Serializer};
    use serde_json::json;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn whole_seconds_encode_as_integers() {
        assert_eq!(to_numeric_date(at(1_700_000_000_000)), json!(1_700_000_000));
    }

    #[test]
    fn millisecond_instants_keep_their_fraction() {
        let value = to_numeric_date(at(1_700_000_000_123));
        assert!(value.is_f64());
        assert_eq!(from_numeric_date(&value), Some(at(1_700_000_000_123)));
    }

    #[test]
    fn integer_and_fractional_dates_decode() {
        assert_eq!(from_numeric_date(&json!(1_700_000_000)), Some(at(1_700_000_000_000)));
        assert_eq!(from_numeric_date(&json!(1_700_000_000.5)), Some(at(1_700_000_000_500)));
        assert_eq!(from_numeric_date(&json!("1700000000")), None);
        assert_eq!(from_numeric_date(&Value::Null), None);
    }

    #[test]
    fn stamp_overrides_caller_reserved_fields() {
        let mut claims = Claims::new().with("id", "46456").with("exp", "never");
        claims.stamp(at(1_000), at(3_000));
        assert_eq!(claims.get("exp"), Some(&json!(3)));
        assert_eq!(claims.issued_at(), Some(at(1_000)));
        assert_eq!(claims.expires_at(), Some(at(3_000)));
    }

    #[test]
    fn without_reserved_returns_caller_payload() {
        let mut claims = Claims::new().with("id", "46456").with("role", 1);
        claims.stamp(at(1_000), at(3_000));
        let payload = claims.without_reserved();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"id": "46456", "role": 1}));
    }

    #[test]
    fn nested_objects_are_accepted() -> Result<()> {
        let claims = Claims::from_serialize(&json!({"user": {"id": 7, "tags": ["a", "b"]}}))?;
        assert_eq!(claims.len(), 1);
        assert_eq!(claims.get("user").and_then(|u| u.get("id")), Some(&json!(7)));
        Ok(())
    }

    #[test]
    fn non_object_payload_is_an_encoding_error() {
        let result = Claims::from_serialize(&vec![1, 2, 3]);
        assert!(matches!(result, Err(Error::Encoding(_))));
        let result = Claims::from_serialize("just a string");
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn unserializable_value_is_an_encoding_error() {
        struct Opaque;
        impl Serialize for Opaque {
            fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(S::Error::custom("opaque handle cannot be serialized"))
            }
        }

        let mut payload = std::collections::HashMap::new();
        payload.insert("handle", Opaque);
        let result = Claims::from_serialize(&payload);
        assert!(matches!(result, Err(Error::Encoding(msg)) if msg.contains("opaque handle")));
    }

    #[test]
    fn empty_claims_are_allowed() -> Result<()> {
        let claims = Claims::from_serialize(&json!({}))?;
        assert!(claims.is_empty());
        Ok(())
    }
}
