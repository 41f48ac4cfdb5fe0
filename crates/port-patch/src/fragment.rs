//! Codec for the literal-block body of a managed patch fragment.
//!
//! A fragment is the text of a single-operation `add` patch:
//!
//! ```yaml
//! - op: add
//!   path: /spec/values/tcp
//!   value: |
//!     33107: prod/svc:31010
//!     33108: prod/svc:31011
//! ```
//!
//! [`decode`] tolerates comments, blank padding, and the `{}` placeholder;
//! [`encode`] always emits the canonical form: body lines sorted ascending
//! by numeric key, four-space indent, `{}` when the mapping is empty.

use crate::types::PortMapping;

/// Body line emitted in place of an empty literal block.
pub const EMPTY_PLACEHOLDER: &str = "{}";

const BODY_INDENT: &str = "    ";

// ── Decode ────────────────────────────────────────────────────────────────

/// Returns true if the trimmed line opens the fragment body.
///
/// Accepts the bare key as well as both literal-block indicators, so
/// fragments written by hand or by other emitters still decode.
fn is_body_marker(trimmed: &str) -> bool {
    matches!(trimmed, "value:" | "value: |" | "value: |-")
}

/// Extract the `key: value` pairs from a fragment's body.
///
/// Capture starts after the body marker. A captured line contributes a pair
/// only when it starts (after indentation) with an ASCII digit, contains a
/// `:` separator, and its key segment is all digits. Anything else (the
/// `{}` placeholder, comment lines, stray prose) is skipped. A trailing
/// `#` comment on a pair line is stripped from the value.
///
/// Decoding never fails; at worst it returns an empty mapping.
pub fn decode(fragment: &str) -> PortMapping {
    let mut mapping = PortMapping::new();
    let mut in_body = false;

    for line in fragment.lines() {
        if !in_body {
            if is_body_marker(line.trim()) {
                in_body = true;
            }
            continue;
        }
        let stripped = line.trim_start();
        if !stripped.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }
        let Some((key, rest)) = stripped.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let Ok(key) = key.parse::<u32>() else {
            continue; // all-digit but out of range
        };
        let mut value = rest.trim();
        if let Some(pos) = value.find('#') {
            value = value[..pos].trim_end();
        }
        mapping.insert(key, value.to_string());
    }
    mapping
}

// ── Encode ────────────────────────────────────────────────────────────────

/// Serialize a mapping into the canonical fragment text for `target_path`.
///
/// Deterministic and idempotent: `decode(&encode(path, &m)) == m` for any
/// mapping whose values do not themselves look like a `digits:` line start.
pub fn encode(target_path: &str, mapping: &PortMapping) -> String {
    let mut lines = vec![
        "- op: add".to_string(),
        format!("  path: {target_path}"),
        "  value: |".to_string(),
    ];
    if mapping.is_empty() {
        // An empty literal block is structurally invalid YAML.
        lines.push(format!("{BODY_INDENT}{EMPTY_PLACEHOLDER}"));
    } else {
        for (key, value) in mapping {
            lines.push(format!("{BODY_INDENT}{key}: {value}"));
        }
    }
    lines.join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(u32, &str)]) -> PortMapping {
        entries.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn decode_simple_body() {
        let fragment = "- op: add\n  path: /spec/values/tcp\n  value: |\n    33107: prod/svc:31010\n    33108: prod/svc:31011";
        assert_eq!(
            decode(fragment),
            pairs(&[(33107, "prod/svc:31010"), (33108, "prod/svc:31011")])
        );
    }

    #[test]
    fn decode_ignores_header_lines() {
        // `path:` and `op:` lines precede the body marker and must not leak in.
        let fragment = "- op: add\n  path: /spec/values/tcp\n  value: |\n    80: a/b:1";
        assert_eq!(decode(fragment), pairs(&[(80, "a/b:1")]));
    }

    #[test]
    fn decode_accepts_all_marker_spellings() {
        for marker in ["value:", "value: |", "value: |-"] {
            let fragment = format!("- op: add\n  path: /x\n  {marker}\n    1: a");
            assert_eq!(decode(&fragment), pairs(&[(1, "a")]), "marker {marker:?}");
        }
    }

    #[test]
    fn decode_skips_placeholder_and_comments() {
        let fragment = "- op: add\n  path: /x\n  value: |\n    {}\n    # reserved for later\n    not-a-pair\n    42: kept";
        assert_eq!(decode(fragment), pairs(&[(42, "kept")]));
    }

    #[test]
    fn decode_strips_inline_comment() {
        let fragment = "- op: add\n  path: /x\n  value: |\n    8080: ns/web:80  # legacy ingress";
        assert_eq!(decode(fragment), pairs(&[(8080, "ns/web:80")]));
    }

    #[test]
    fn decode_rejects_non_digit_keys() {
        let fragment = "- op: add\n  path: /x\n  value: |\n    8x80: oops\n    : empty";
        assert_eq!(decode(fragment), PortMapping::new());
    }

    #[test]
    fn decode_keeps_colons_in_values() {
        let fragment = "- op: add\n  path: /x\n  value: |\n    33107: prod/svc:31010";
        assert_eq!(decode(fragment)[&33107], "prod/svc:31010");
    }

    #[test]
    fn decode_empty_fragment() {
        assert_eq!(decode(""), PortMapping::new());
        assert_eq!(decode("- op: add\n  path: /x\n  value: |"), PortMapping::new());
    }

    #[test]
    fn encode_sorts_numerically() {
        let mapping = pairs(&[(9, "a"), (80, "b"), (443, "c"), (10, "d")]);
        let text = encode("/spec/values/tcp", &mapping);
        assert_eq!(
            text,
            "- op: add\n  path: /spec/values/tcp\n  value: |\n    9: a\n    10: d\n    80: b\n    443: c"
        );
    }

    #[test]
    fn encode_empty_mapping_emits_placeholder() {
        let text = encode("/x", &PortMapping::new());
        assert!(text.ends_with("  value: |\n    {}"));
    }

    #[test]
    fn round_trip() {
        let mapping = pairs(&[(33107, "prod/svc:31010"), (30085, "8080"), (1, "x")]);
        assert_eq!(decode(&encode("/spec/values/tcp", &mapping)), mapping);
    }

    #[test]
    fn encode_is_stable_under_reencode() {
        let mapping = pairs(&[(5, "a/b:1"), (50, "a/b:2")]);
        let once = encode("/x", &mapping);
        let twice = encode("/x", &decode(&once));
        assert_eq!(once, twice);
    }
}
