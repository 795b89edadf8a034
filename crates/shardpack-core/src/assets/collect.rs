//! Merging per-package asset declarations into one set.

use super::extra::{AssetDeclaration, AssetGroup};
use crate::error::Error;
use std::collections::HashMap;

/// Declarations merged across all installed packages plus the root package.
///
/// Entries are sorted case-insensitively by name, with a case-sensitive
/// tiebreak, so the merge is deterministic regardless of input order.
#[derive(Debug, Clone, Default)]
pub struct MergedAssets {
    groups: [Vec<(String, String)>; 3],
}

impl MergedAssets {
    /// Merged entries for one group.
    #[must_use]
    pub fn group(&self, group: AssetGroup) -> &[(String, String)] {
        &self.groups[group.index()]
    }

    /// True when no group holds any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }
}

/// Merge the ordered package declarations, then overlay the root declaration.
///
/// A name two non-root packages declare with different values is a conflict
/// and aborts the whole merge, unless the root declaration overrides that
/// name. Exact duplicates merge silently. Root entries always win.
///
/// Pure function over its inputs; nothing is written.
pub fn merge_assets(
    packages: &[AssetDeclaration],
    root: &AssetDeclaration,
) -> Result<MergedAssets, Error> {
    let mut merged = MergedAssets::default();

    for group in AssetGroup::ALL {
        let root_entries = root.group(group);
        let mut acc: HashMap<String, String> = HashMap::new();

        for decl in packages {
            let entries = decl.group(group);

            let mut conflicts: Vec<String> = Vec::new();
            for (name, value) in entries {
                if root_entries.contains_key(name) {
                    continue;
                }
                if let Some(earlier) = acc.get(name) {
                    if earlier != value {
                        conflicts.push(name.clone());
                    }
                }
            }
            if !conflicts.is_empty() {
                conflicts.sort();
                return Err(Error::AssetConflict {
                    group,
                    names: conflicts,
                });
            }

            acc.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        // Root always wins.
        acc.extend(root_entries.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut entries: Vec<(String, String)> = acc.into_iter().collect();
        entries.sort_by(|a, b| {
            a.0.to_lowercase()
                .cmp(&b.0.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        });
        merged.groups[group.index()] = entries;
    }

    Ok(merged)
}
