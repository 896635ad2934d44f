//! Canonical JSON serialisation.
//!
//! Object keys are sorted recursively before the tree is written out, so two values with the
//! same content always produce the same bytes regardless of how their maps were built. Arrays
//! keep their order: order inside a list is content.

use crate::FingerprintResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Serialise `value` to canonical compact JSON bytes.
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> FingerprintResult<Vec<u8>> {
    let tree = serde_json::to_value(value)?;
    Ok(serde_json::to_vec(&canonicalise(tree))?)
}

/// Returns `value` with every object's keys in ascending byte order.
pub fn canonicalise(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, child) in entries {
                sorted.insert(key, canonicalise(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalise).collect()),
        scalar => scalar,
    }
}
