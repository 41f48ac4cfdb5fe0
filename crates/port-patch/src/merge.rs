//! The merge engine: locate, decode, reconcile, encode, write back.

use serde_yaml::{Mapping, Sequence, Value};

use crate::fragment;
use crate::locate::{self, EntryKind};
use crate::policy::MergePolicy;
use crate::report::{MergeAction, Report};
use crate::types::{MergeError, PortMapping};

const PATCHES_KEY: &str = "patches";

/// Merge `incoming` pairs into the managed patch for `target_path`.
///
/// On success the entry is rewritten in place (same list position) or a new
/// managed entry is appended; every other patch entry is preserved
/// byte-for-byte. On conflict the document is left untouched and the error
/// carries every colliding key with its current value.
///
/// Atomicity: callers merging a paired second entry put both pairs into one
/// `incoming` mapping, so the conflict check covers the pair as one logical
/// allocation: both land or neither does.
pub fn merge(
    doc: &mut Mapping,
    target_path: &str,
    incoming: &PortMapping,
    policy: MergePolicy,
) -> Result<Report, MergeError> {
    let patches = match doc.get(PATCHES_KEY) {
        // A non-sequence `patches` value is outside the data model; clobbering
        // it silently would be worse than failing.
        Some(value) => Some(
            value
                .as_sequence()
                .ok_or(MergeError::PatchesNotASequence)?,
        ),
        None => None,
    };
    let index = patches.and_then(|seq| locate::find(seq, target_path));

    let current = match (patches, index) {
        (Some(seq), Some(i)) => match locate::classify(&seq[i]) {
            EntryKind::Managed { fragment, .. } => fragment::decode(&fragment),
            EntryKind::Opaque => PortMapping::new(),
        },
        _ => PortMapping::new(),
    };

    let merged = policy.reconcile(&current, incoming)?;

    let added = incoming
        .keys()
        .filter(|key| !current.contains_key(*key))
        .copied()
        .collect();
    let updated = incoming
        .iter()
        .filter(|&(key, value)| current.get(key).is_some_and(|cur| cur != value))
        .map(|(key, _)| *key)
        .collect();

    let entry = managed_entry(target_path, &merged);

    // Compute the new list rather than mutating by index, so a failure above
    // this point cannot leave a half-applied document.
    let mut list: Sequence = patches.cloned().unwrap_or_default();
    let action = match index {
        Some(i) => {
            list[i] = entry;
            MergeAction::Updated
        }
        None => {
            list.push(entry);
            MergeAction::Created
        }
    };
    doc.insert(
        Value::String(PATCHES_KEY.to_string()),
        Value::Sequence(list),
    );

    Ok(Report {
        action,
        path: target_path.to_string(),
        added,
        updated,
    })
}

/// Wrap an encoded fragment into a `{patch: <literal block>}` entry.
fn managed_entry(target_path: &str, mapping: &PortMapping) -> Value {
    let mut map = Mapping::new();
    map.insert(
        Value::String("patch".to_string()),
        Value::String(fragment::encode(target_path, mapping)),
    );
    Value::Mapping(map)
}

// ── Tests ─────────────────────────────────────────────────────────────────
