//! JSON codec helpers.
//!
//! Thin wrappers around `serde_json` for encoding and decoding replication
//! payloads. The wire format is JSON with explicit type tags on every frame,
//! record, and map; a payload missing its tag fails decoding closed instead
//! of silently coercing.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::NetError;

/// Encode a value to a JSON string.
///
/// # Errors
///
/// Returns [`NetError::Encode`] if serialisation fails.
pub fn encode<T: Serialize>(value: &T) -> Result<String, NetError> {
    serde_json::to_string(value).map_err(NetError::Encode)
}

/// Decode a value from a JSON string.
///
/// # Errors
///
/// Returns [`NetError::Decode`] if deserialisation fails.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, NetError> {
    serde_json::from_str(json).map_err(NetError::Decode)
}

/// Serde adapter giving [`glam::Vec2`] its wire representation: an `{x, y}`
/// object, not the `[x, y]` tuple glam defaults to.
pub(crate) mod vec2_xy {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f32,
        y: f32,
    }

    pub fn serialize<S: Serializer>(value: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
        Xy {
            x: value.x,
            y: value.y,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let Xy { x, y } = Xy::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct TestMsg {
        value: u32,
        name: String,
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let msg = TestMsg {
            value: 42,
            name: "hello".to_string(),
        };
        let json = encode(&msg).unwrap();
        let restored: TestMsg = decode(&json).unwrap();
        assert_eq!(msg, restored);
    }

    #[test]
    fn test_decode_invalid_payload() {
        let result: Result<TestMsg, _> = decode("{\"value\":\"not a number\"}");
        assert!(result.is_err());
    }
}
