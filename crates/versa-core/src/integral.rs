//! Serde helper for optional `u64` fields declared `"type": "integer"`.
//!
//! JSON Schema treats `4096.0` as an integer; serde's `u64` only accepts
//! `4096`. Fields tagged `#[serde(default, with = "crate::integral")]`
//! accept both and always serialize the integer spelling.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = number.as_u64() {
        return Ok(Some(n));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 => Ok(Some(f as u64)),
        _ => Err(D::Error::custom(format_args!(
            "invalid value: {number}, expected a non-negative integer"
        ))),
    }
}
