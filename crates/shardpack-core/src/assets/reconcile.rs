//! Reconciling merged declarations against the on-disk manifest.

use super::collect::MergedAssets;
use super::extra::AssetGroup;
use serde_json::{Map, Value};
use std::fmt;

/// Description written into freshly created manifests.
pub const MANIFEST_DESCRIPTION: &str = "Assets for byteShard";

/// A single add or update the reconciler wants to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestChange {
    pub group: AssetGroup,
    pub name: String,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Add { version: String },
    Update { from: String, to: String },
}

impl fmt::Display for ManifestChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ChangeKind::Add { version } => write!(
                f,
                "add field {} with version {} to {} in package.json",
                self.name, version, self.group
            ),
            ChangeKind::Update { from, to } => write!(
                f,
                "update field {} from version {} to {} at {} in package.json",
                self.name, from, to, self.group
            ),
        }
    }
}

/// Result of comparing merged declarations with the existing manifest.
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// Manifest object ready to serialize.
    pub manifest: Map<String, Value>,
    /// Whether anything needs to be written and reinstalled.
    pub changed: bool,
    /// Operator-facing add/update notifications. Informational only.
    pub changes: Vec<ManifestChange>,
}

/// Compare `merged` against the existing manifest.
///
/// With no existing manifest a fresh one is built and `changed` is true.
/// Otherwise each group is overlaid onto the existing one (existing keys
/// keep their position, merged values win, new names append) and unrelated
/// top-level keys pass through untouched. A missing node_modules directory
/// forces `changed` even without manifest differences.
#[must_use]
pub fn reconcile(
    merged: &MergedAssets,
    existing: Option<Map<String, Value>>,
    node_modules_present: bool,
) -> ReconcileOutcome {
    let Some(mut manifest) = existing else {
        return fresh_manifest(merged);
    };

    let mut changed = !node_modules_present;
    let mut changes = Vec::new();

    for group in AssetGroup::ALL {
        let current = manifest
            .get(group.key())
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let mut group_changed = false;
        let mut updated = current.clone();
        for (name, version) in merged.group(group) {
            match current.get(name) {
                None => {
                    changes.push(ManifestChange {
                        group,
                        name: name.clone(),
                        kind: ChangeKind::Add {
                            version: version.clone(),
                        },
                    });
                    group_changed = true;
                }
                Some(value) if value.as_str() != Some(version) => {
                    changes.push(ManifestChange {
                        group,
                        name: name.clone(),
                        kind: ChangeKind::Update {
                            from: display_version(value),
                            to: version.clone(),
                        },
                    });
                    group_changed = true;
                }
                Some(_) => {}
            }
            updated.insert(name.clone(), Value::String(version.clone()));
        }

        if group_changed || !node_modules_present {
            manifest.insert(group.key().to_string(), Value::Object(updated));
            changed |= group_changed;
        }
    }

    ReconcileOutcome {
        manifest,
        changed,
        changes,
    }
}

fn fresh_manifest(merged: &MergedAssets) -> ReconcileOutcome {
    let mut manifest = Map::new();
    manifest.insert(
        "description".to_string(),
        Value::String(MANIFEST_DESCRIPTION.to_string()),
    );
    for group in AssetGroup::ALL {
        manifest.insert(
            group.key().to_string(),
            Value::Object(group_object(merged.group(group))),
        );
    }
    manifest.insert("private".to_string(), Value::Bool(true));

    ReconcileOutcome {
        manifest,
        changed: true,
        changes: Vec::new(),
    }
}

fn group_object(entries: &[(String, String)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(name, version)| (name.clone(), Value::String(version.clone())))
        .collect()
}

fn display_version(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
