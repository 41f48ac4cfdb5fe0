//! Generic recursive helpers over YAML values: deep merge and key sorting.
//!
//! Standalone utilities with no coupling to the patch engine; handy when an
//! overlay document is assembled from several partial documents before the
//! port patches are merged in.

use serde_yaml::{Mapping, Value};

/// Recursively merge `overlay` into `target`.
///
/// Mappings merge key by key; any other pair of values is resolved by
/// overwriting the target with a clone of the overlay (arrays replace
/// wholesale rather than concatenating).
pub fn deep_merge(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Mapping(target_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match target_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, overlay_value),
                    None => {
                        target_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (target_value, overlay_value) => {
            *target_value = overlay_value.clone();
        }
    }
}

/// Return a copy of `value` with every mapping's keys sorted.
///
/// Keys sort by their textual form, so string keys come out alphabetical
/// and numeric keys in lexicographic digit order. Sequences keep their
/// element order; only mapping key order changes.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(&Value, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| key_text(a).cmp(&key_text(b)));
            let mut sorted = Mapping::new();
            for (key, val) in entries {
                sorted.insert(key.clone(), sort_keys(val));
            }
            Value::Mapping(sorted)
        }
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
