//! Loading, rendering, and storing the surrounding YAML document.
//!
//! The merge engine itself never touches the filesystem; this layer turns a
//! file path into the `serde_yaml::Mapping` the engine works on and back.
//! An absent or unreadable file is a [`DocumentError`] distinct from any
//! merge failure, so callers can tell the two outcomes apart.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::types::DocumentError;

/// Load a YAML document as an ordered mapping.
///
/// An empty or `null` document yields an empty mapping (a fresh overlay file
/// is a valid starting point); any other non-mapping top level is an error.
pub fn load(path: &Path) -> Result<Mapping, DocumentError> {
    if !path.is_file() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(DocumentError::NotAMapping(path.to_path_buf())),
    }
}

/// Render the document to YAML text, as written by [`save`].
pub fn render(doc: &Mapping) -> Result<String, DocumentError> {
    serde_yaml::to_string(doc).map_err(DocumentError::Render)
}

/// Write the document back to `path`.
pub fn save(path: &Path, doc: &Mapping) -> Result<(), DocumentError> {
    let text = render(doc)?;
    fs::write(path, text).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────
