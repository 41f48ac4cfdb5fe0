//! Merge reports: what a merge did, for humans and for machines.

use serde::Serialize;

/// Whether the merge created a new managed entry or rewrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeAction {
    Created,
    Updated,
}

/// Summary of one successful merge.
///
/// `added` holds keys absent before the merge, `updated` keys whose value
/// changed; a key submitted with its current value appears in neither list.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub action: MergeAction,
    pub path: String,
    pub added: Vec<u32>,
    pub updated: Vec<u32>,
}

impl Report {
    /// One-line human-readable summary.
    pub fn render(&self) -> String {
        let verb = match self.action {
            MergeAction::Created => "Created new patch for",
            MergeAction::Updated => "Updated existing patch at",
        };
        let mut parts = Vec::new();
        if !self.added.is_empty() {
            parts.push(format!("added {}", join_keys(&self.added)));
        }
        if !self.updated.is_empty() {
            parts.push(format!("updated {}", join_keys(&self.updated)));
        }
        if parts.is_empty() {
            parts.push("no changes".to_string());
        }
        format!("{verb} {} ({})", self.path, parts.join("; "))
    }
}

fn join_keys(keys: &[u32]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ─────────────────────────────────────────────────────────────────
