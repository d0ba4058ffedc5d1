//! Type-tagged serialization primitives.
//!
//! The wire contract requires every serializable value to carry an explicit
//! type tag and every dictionary-typed field to be wrapped as
//! `{"dataType":"Map","value":[[key,value],...]}`. [`TaggedMap`] implements
//! the map wrapper; the single-variant tag enums are embedded as `__type`
//! fields on records, so a payload missing or mangling its tag fails
//! deserialization instead of coercing silently.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A map encoded losslessly as `{"dataType":"Map","value":[[k,v],...]}`.
///
/// Keys need not be strings (entries are tuples, not JSON object keys), key
/// order on the wire is irrelevant, and key uniqueness is preserved. Backed
/// by a `BTreeMap` so encoding is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedMap<K: Ord, V>(pub BTreeMap<K, V>);

impl<K: Ord, V> TaggedMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord, V> Default for TaggedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> std::ops::Deref for TaggedMap<K, V> {
    type Target = BTreeMap<K, V>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Ord, V> std::ops::DerefMut for TaggedMap<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TaggedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K: Ord + Serialize, V: Serialize> Serialize for TaggedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<(&K, &V)> = self.0.iter().collect();
        let mut s = serializer.serialize_struct("TaggedMap", 2)?;
        s.serialize_field("dataType", "Map")?;
        s.serialize_field("value", &entries)?;
        s.end()
    }
}

/// The literal `"Map"` discriminator; any other value fails decoding.
#[derive(Debug, Deserialize)]
enum MapTag {
    Map,
}

#[derive(Debug, Deserialize)]
struct TaggedMapRepr<K, V> {
    #[serde(rename = "dataType")]
    #[allow(dead_code)]
    data_type: MapTag,
    value: Vec<(K, V)>,
}

impl<'de, K: Ord + Deserialize<'de>, V: Deserialize<'de>> Deserialize<'de> for TaggedMap<K, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = TaggedMapRepr::<K, V>::deserialize(deserializer)?;
        Ok(Self(repr.value.into_iter().collect()))
    }
}

// ── Record type tags ────────────────────────────────────────────────────────
//
// Single-variant enums embedded as `__type` fields. Deserialization of a
// record whose tag is absent or names a different type fails.

/// `__type` tag of the [`WorldState`](crate::WorldState) container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldStateTag {
    #[default]
    WorldState,
}

/// `__type` tag of an [`EntityRecord`](crate::EntityRecord).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRecordTag {
    #[default]
    EntityRecord,
}

/// `__type` tag of an [`ItemRecord`](crate::ItemRecord).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemRecordTag {
    #[default]
    ItemRecord,
}

/// `__type` tag of a [`FixtureRecord`](crate::FixtureRecord).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureRecordTag {
    #[default]
    FixtureRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tagged_map_wire_shape() {
        let map: TaggedMap<u32, &str> = [(2u32, "b"), (1u32, "a")].into_iter().collect();
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(
            value,
            json!({"dataType": "Map", "value": [[1, "a"], [2, "b"]]})
        );
    }

    #[test]
    fn test_tagged_map_roundtrip() {
        let map: TaggedMap<String, u32> = [("x".to_string(), 1), ("y".to_string(), 2)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        let restored: TaggedMap<String, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, restored);
    }

    #[test]
    fn test_tagged_map_rejects_missing_tag() {
        let result: Result<TaggedMap<u32, u32>, _> =
            serde_json::from_value(json!({"value": [[1, 2]]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_tagged_map_rejects_wrong_tag() {
        let result: Result<TaggedMap<u32, u32>, _> =
            serde_json::from_value(json!({"dataType": "Set", "value": [[1, 2]]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_tagged_map_key_order_irrelevant_and_unique() {
        let json = json!({"dataType": "Map", "value": [[5, "e"], [1, "a"], [5, "late"]]});
        let restored: TaggedMap<u32, String> = serde_json::from_value(json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(&5).map(String::as_str), Some("late"));
    }
}
