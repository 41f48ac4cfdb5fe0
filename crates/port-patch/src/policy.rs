//! Conflict policies for reconciling incoming pairs with a current mapping.

use crate::types::{MergeError, PortMapping};

/// How key collisions between incoming and current pairs are resolved.
///
/// The policy is a fixed property of the target-path family, not a per-call
/// choice: re-pointing a tcp forward is a low-blast-radius convenience,
/// while silently reassigning a node port could double-allocate an
/// externally visible port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Incoming pairs overwrite on collision, append otherwise. Never fails.
    MergeUpdate,
    /// Any collision aborts the whole merge with a [`MergeError::Conflict`]
    /// naming every offending key. Disjoint keys append as usual.
    Exclusive,
}

impl MergePolicy {
    /// Compute the merged mapping, or fail without touching anything.
    pub fn reconcile(
        self,
        current: &PortMapping,
        incoming: &PortMapping,
    ) -> Result<PortMapping, MergeError> {
        if self == MergePolicy::Exclusive {
            let collisions: Vec<(u32, String)> = incoming
                .keys()
                .filter_map(|key| current.get(key).map(|existing| (*key, existing.clone())))
                .collect();
            if !collisions.is_empty() {
                return Err(MergeError::Conflict { collisions });
            }
        }
        let mut merged = current.clone();
        merged.extend(incoming.iter().map(|(k, v)| (*k, v.clone())));
        Ok(merged)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
