//! Core types and errors for the port-patch engine.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// The decoded state of one patch fragment's body: external port (or node
/// port) to target string.
///
/// Keys are numeric so the encoded form sorts ascending for free; values are
/// opaque strings (`namespace/service:port` for the tcp family, a bare
/// container port for the nodeport family).
pub type PortMapping = BTreeMap<u32, String>;

// ── Errors ────────────────────────────────────────────────────────────────

/// Failure of one merge invocation. The document is never modified when a
/// merge fails.
#[derive(Debug, Error, PartialEq)]
pub enum MergeError {
    /// The exclusive policy found one or more incoming keys already bound.
    #[error("port conflict: {}", format_collisions(.collisions))]
    Conflict {
        /// Each colliding key with its currently bound value.
        collisions: Vec<(u32, String)>,
    },

    /// The document's `patches` key holds something other than a sequence.
    /// Rewriting it would clobber data outside the data model, so the merge
    /// refuses instead.
    #[error("`patches` is present but not a sequence; refusing to rewrite it")]
    PatchesNotASequence,
}

impl MergeError {
    /// The keys that blocked the merge, empty for non-conflict failures.
    pub fn conflicting_keys(&self) -> Vec<u32> {
        match self {
            MergeError::Conflict { collisions } => collisions.iter().map(|(k, _)| *k).collect(),
            MergeError::PatchesNotASequence => Vec::new(),
        }
    }
}

fn format_collisions(collisions: &[(u32, String)]) -> String {
    collisions
        .iter()
        .map(|(key, existing)| format!("{key} is already bound to {existing}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure to load, render, or store the surrounding YAML document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("top-level value of {0} is not a mapping")]
    NotAMapping(PathBuf),

    #[error("failed to render document: {0}")]
    Render(#[source] serde_yaml::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_keys_and_values() {
        let err = MergeError::Conflict {
            collisions: vec![(30085, "8080".to_string()), (30086, "9090".to_string())],
        };
        let msg = err.to_string();
        assert!(msg.contains("30085 is already bound to 8080"));
        assert!(msg.contains("30086 is already bound to 9090"));
    }

    #[test]
    fn conflicting_keys_lists_all() {
        let err = MergeError::Conflict {
            collisions: vec![(1, "a".to_string()), (2, "b".to_string())],
        };
        assert_eq!(err.conflicting_keys(), vec![1, 2]);
    }

    #[test]
    fn non_conflict_errors_have_no_keys() {
        assert!(MergeError::PatchesNotASequence.conflicting_keys().is_empty());
    }
}
