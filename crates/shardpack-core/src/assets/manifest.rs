//! Reading and writing the merged npm manifest (package.json).

use crate::error::Error;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read an existing manifest, if any.
///
/// Returns `None` when no file exists. Unreadable or syntactically invalid
/// manifests are fatal; the error text carries the remediation hint.
pub fn read_manifest(path: &Path) -> Result<Option<Map<String, Value>>, Error> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Map<String, Value> =
        serde_json::from_str(&content).map_err(|source| Error::ParseFile {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(manifest))
}

/// Serialize a manifest with 2-space indentation and a trailing newline.
pub fn render_manifest(manifest: &Map<String, Value>) -> Result<String, Error> {
    let mut rendered = serde_json::to_string_pretty(manifest)
        .map_err(|e| Error::other(format!("failed to serialize manifest: {e}")))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write a manifest atomically, replacing any existing file.
pub fn write_manifest(path: &Path, manifest: &Map<String, Value>) -> Result<(), Error> {
    let rendered = render_manifest(manifest)?;
    shardpack_util::fs::atomic_write(path, rendered.as_bytes())?;
    Ok(())
}
