//! Installed-package metadata from the vendor directory.

use crate::error::Error;
use crate::paths;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// One installed package: its name and raw `extra` metadata.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    pub name: String,
    pub extra: Value,
}

/// Read the root package's `extra` metadata from the project descriptor.
///
/// A missing descriptor yields empty extras so a bare project can still run
/// the publish step; unreadable or malformed files are errors.
pub fn read_root_extra(project_root: &Path) -> Result<Value, Error> {
    let path = paths::root_descriptor_path(project_root);
    if !path.exists() {
        return Ok(Value::Object(Map::new()));
    }

    let content = fs::read_to_string(&path).map_err(|source| Error::ReadFile {
        path: path.clone(),
        source,
    })?;
    let descriptor: Value =
        serde_json::from_str(&content).map_err(|source| Error::ParseFile { path, source })?;

    Ok(descriptor
        .get("extra")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new())))
}

/// Read the ordered list of installed packages from the vendor directory.
///
/// Accepts both the wrapped `{"packages": [...]}` layout and the legacy bare
/// array. A missing file means nothing is installed yet. Entries without a
/// name are skipped.
pub fn read_installed_packages(vendor_dir: &Path) -> Result<Vec<InstalledPackage>, Error> {
    let path = paths::installed_descriptor_path(vendor_dir);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path).map_err(|source| Error::ReadFile {
        path: path.clone(),
        source,
    })?;
    let descriptor: Value =
        serde_json::from_str(&content).map_err(|source| Error::ParseFile { path, source })?;

    let entries: &[Value] = match &descriptor {
        Value::Array(entries) => entries,
        Value::Object(map) => map
            .get("packages")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice),
        _ => &[],
    };

    let mut packages = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(name) = entry.get("name").and_then(Value::as_str) else {
            continue;
        };
        let extra = entry
            .get("extra")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        packages.push(InstalledPackage {
            name: name.to_string(),
            extra,
        });
    }

    Ok(packages)
}
