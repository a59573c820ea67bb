//! Recursive merge of a locale override document onto a default content tree.
//!
//! Pure and deterministic, which is what makes the per-locale memoization in
//! `cache` safe without locking around the computation.

use serde_json::Value;

/// Merge an optional override document onto a default tree.
///
/// Rules, applied recursively from the default tree's shape:
/// - Scalar leaf: the override value wins whenever the key is present,
///   including explicit empty strings and `false`/`0`. Only a *missing* key
///   falls back to the default.
/// - Array leaf: an override array replaces the default wholesale; no
///   per-element merge, no concatenation.
/// - Nested object: recurse key-by-key over the default's keys. Override
///   keys the default does not define are ignored; the default defines the
///   contract.
/// - `None` override (file absent or unparsable upstream): pure default.
pub fn merge(default: &Value, override_doc: Option<&Value>) -> Value {
    match override_doc {
        Some(doc) => merge_value(default, doc),
        None => default.clone(),
    }
}

fn merge_value(default: &Value, override_val: &Value) -> Value {
    match (default, override_val) {
        (Value::Object(default_map), Value::Object(override_map)) => {
            let mut merged = serde_json::Map::with_capacity(default_map.len());
            for (key, default_child) in default_map {
                let value = match override_map.get(key) {
                    Some(override_child) => merge_value(default_child, override_child),
                    None => default_child.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        // An override that replaces an object subtree with a non-object does
        // not fit the schema; keep the default subtree.
        (Value::Object(_), _) => default.clone(),
        // Scalars and arrays: the override wins wholesale.
        (_, override_val) => override_val.clone(),
    }
}
