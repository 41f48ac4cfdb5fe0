//! Classification and lookup of patch-list entries.
//!
//! An entry the engine may rewrite ("managed") is a mapping with exactly the
//! single key `patch` whose fragment declares exactly one operation, `add`,
//! against a declared path. Everything else (entries with a `target`
//! selector, multi-op fragments, non-add operations, unparseable shapes) is
//! opaque and must never be altered or reordered.

use serde_yaml::{Sequence, Value};

/// The structural classification of one patch-list entry.
///
/// Computed fresh on each scan; there is no type tag in the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A rewritable single-op `add` fragment and the path it declares.
    Managed { fragment: String, path: String },
    /// Anything the engine must leave untouched.
    Opaque,
}

/// Header line content after indentation and the sequence dash.
fn header_content(line: &str) -> &str {
    line.trim().trim_start_matches("- ").trim_start()
}

/// Classify a patch-list entry.
///
/// A fragment whose header does not match the single-op `add` shape closely
/// enough is simply opaque: a recoverable outcome, not an error.
pub fn classify(entry: &Value) -> EntryKind {
    let Some(map) = entry.as_mapping() else {
        return EntryKind::Opaque;
    };
    // A `target` selector (or any second key) marks a scoped patch.
    if map.len() != 1 {
        return EntryKind::Opaque;
    }
    let Some(fragment) = map.get("patch").and_then(Value::as_str) else {
        return EntryKind::Opaque;
    };

    let mut op = None;
    let mut path = None;
    for line in fragment.lines() {
        let content = header_content(line);
        if let Some(rest) = content.strip_prefix("op:") {
            if op.is_some() {
                return EntryKind::Opaque; // multi-op fragment
            }
            op = Some(rest.trim());
        } else if let Some(rest) = content.strip_prefix("path:") {
            if path.is_none() {
                path = Some(rest.trim());
            }
        }
    }
    match (op, path) {
        (Some("add"), Some(path)) => EntryKind::Managed {
            fragment: fragment.to_string(),
            path: path.to_string(),
        },
        _ => EntryKind::Opaque,
    }
}

/// Index of the first managed entry declaring `target_path`.
///
/// A document is expected to hold at most one managed entry per path; if
/// more exist, only the first is ever touched.
pub fn find(patches: &Sequence, target_path: &str) -> Option<usize> {
    patches.iter().position(|entry| {
        matches!(classify(entry), EntryKind::Managed { ref path, .. } if path == target_path)
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(fragment: &str) -> Value {
        let mut map = serde_yaml::Mapping::new();
        map.insert(
            Value::String("patch".to_string()),
            Value::String(fragment.to_string()),
        );
        Value::Mapping(map)
    }

    const TCP_FRAGMENT: &str = "- op: add\n  path: /spec/values/tcp\n  value: |\n    80: a/b:1";

    #[test]
    fn managed_single_add() {
        assert_eq!(
            classify(&entry(TCP_FRAGMENT)),
            EntryKind::Managed {
                fragment: TCP_FRAGMENT.to_string(),
                path: "/spec/values/tcp".to_string(),
            }
        );
    }

    #[test]
    fn target_selector_is_opaque() {
        let mut map = serde_yaml::Mapping::new();
        map.insert(
            Value::String("patch".to_string()),
            Value::String(TCP_FRAGMENT.to_string()),
        );
        map.insert(
            Value::String("target".to_string()),
            Value::String("kind=Service".to_string()),
        );
        assert_eq!(classify(&Value::Mapping(map)), EntryKind::Opaque);
    }

    #[test]
    fn multi_op_is_opaque() {
        let fragment = "- op: add\n  path: /a\n  value: x\n- op: remove\n  path: /b";
        assert_eq!(classify(&entry(fragment)), EntryKind::Opaque);
    }

    #[test]
    fn non_add_is_opaque() {
        let fragment = "- op: replace\n  path: /a\n  value: x";
        assert_eq!(classify(&entry(fragment)), EntryKind::Opaque);
    }

    #[test]
    fn missing_path_is_opaque() {
        assert_eq!(classify(&entry("- op: add\n  value: x")), EntryKind::Opaque);
    }

    #[test]
    fn non_string_fragment_is_opaque() {
        let mut map = serde_yaml::Mapping::new();
        map.insert(Value::String("patch".to_string()), Value::Number(1.into()));
        assert_eq!(classify(&Value::Mapping(map)), EntryKind::Opaque);
        assert_eq!(classify(&Value::String("patch".to_string())), EntryKind::Opaque);
    }

    #[test]
    fn find_matches_path_exactly() {
        let other = "- op: add\n  path: /spec/values/udp\n  value: |\n    53: a/b:53";
        let patches: Sequence = vec![entry(other), entry(TCP_FRAGMENT)];
        assert_eq!(find(&patches, "/spec/values/tcp"), Some(1));
        assert_eq!(find(&patches, "/spec/values/udp"), Some(0));
        assert_eq!(find(&patches, "/spec/values/sctp"), None);
    }

    #[test]
    fn find_returns_first_of_duplicates() {
        let patches: Sequence = vec![entry(TCP_FRAGMENT), entry(TCP_FRAGMENT)];
        assert_eq!(find(&patches, "/spec/values/tcp"), Some(0));
    }

    #[test]
    fn find_skips_opaque_entries() {
        let multi = "- op: add\n  path: /spec/values/tcp\n  value: x\n- op: add\n  path: /spec/values/tcp\n  value: y";
        let patches: Sequence = vec![entry(multi), entry(TCP_FRAGMENT)];
        assert_eq!(find(&patches, "/spec/values/tcp"), Some(1));
    }
}
