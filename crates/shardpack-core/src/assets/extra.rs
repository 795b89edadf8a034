//! Asset declarations parsed from package metadata extras.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Key under a package's `extra` metadata that holds its npm declaration.
pub const NPM_EXTRA_KEY: &str = "npm";

/// The three npm asset groups a package may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetGroup {
    Scripts,
    Dependencies,
    DevDependencies,
}

impl AssetGroup {
    /// All groups, in manifest order.
    pub const ALL: [Self; 3] = [Self::Scripts, Self::Dependencies, Self::DevDependencies];

    /// The manifest key for this group.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Scripts => "scripts",
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
        }
    }

    /// Parse a manifest key back into a group.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.key() == key)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Scripts => 0,
            Self::Dependencies => 1,
            Self::DevDependencies => 2,
        }
    }
}

impl fmt::Display for AssetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One package's npm asset declaration: a name→value map per group.
///
/// Names are unique per group by construction (source object semantics).
#[derive(Debug, Clone, Default)]
pub struct AssetDeclaration {
    groups: [HashMap<String, String>; 3],
}

impl AssetDeclaration {
    /// Parse a declaration from a package's raw `extra` metadata.
    ///
    /// Only the nested `npm` object is consulted. Recognized group keys copy
    /// their string entries. Any other key in the `npm` object is a legacy
    /// flat entry and lands under `dependencies`. Malformed shapes (missing
    /// `npm`, non-object sections, non-string values) are treated as empty.
    #[must_use]
    pub fn from_extra(extra: &Value) -> Self {
        let mut decl = Self::default();
        let Some(npm) = extra.get(NPM_EXTRA_KEY).and_then(Value::as_object) else {
            return decl;
        };

        for group in AssetGroup::ALL {
            if let Some(section) = npm.get(group.key()).and_then(Value::as_object) {
                let entries = &mut decl.groups[group.index()];
                for (name, value) in section {
                    if let Some(value) = value.as_str() {
                        entries.insert(name.clone(), value.to_string());
                    }
                }
            }
        }

        // Legacy flat layout: unrecognized keys are dependency entries.
        for (key, value) in npm {
            if AssetGroup::from_key(key).is_none() {
                if let Some(value) = value.as_str() {
                    decl.groups[AssetGroup::Dependencies.index()]
                        .insert(key.clone(), value.to_string());
                }
            }
        }

        decl
    }

    /// Entries declared for one group.
    #[must_use]
    pub fn group(&self, group: AssetGroup) -> &HashMap<String, String> {
        &self.groups[group.index()]
    }

    /// Insert one entry.
    pub fn insert(
        &mut self,
        group: AssetGroup,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.groups[group.index()].insert(name.into(), value.into());
    }

    /// True when no group declares anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(HashMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_recognized_groups() {
        let extra = json!({
            "npm": {
                "scripts": {"build": "webpack"},
                "dependencies": {"lodash": "4.17.21"},
                "devDependencies": {"eslint": "8.0.0"}
            }
        });

        let decl = AssetDeclaration::from_extra(&extra);

        assert_eq!(
            decl.group(AssetGroup::Scripts).get("build"),
            Some(&"webpack".to_string())
        );
        assert_eq!(
            decl.group(AssetGroup::Dependencies).get("lodash"),
            Some(&"4.17.21".to_string())
        );
        assert_eq!(
            decl.group(AssetGroup::DevDependencies).get("eslint"),
            Some(&"8.0.0".to_string())
        );
    }

    #[test]
    fn test_legacy_flat_keys_become_dependencies() {
        let extra = json!({"npm": {"foo": "1.2.3"}});

        let decl = AssetDeclaration::from_extra(&extra);

        assert_eq!(
            decl.group(AssetGroup::Dependencies).get("foo"),
            Some(&"1.2.3".to_string())
        );
        assert!(decl.group(AssetGroup::Scripts).is_empty());
        assert!(decl.group(AssetGroup::DevDependencies).is_empty());
    }

    #[test]
    fn test_legacy_and_recognized_keys_coexist() {
        let extra = json!({
            "npm": {
                "dependencies": {"lodash": "4.17.21"},
                "jquery": "3.6.0"
            }
        });

        let decl = AssetDeclaration::from_extra(&extra);

        let deps = decl.group(AssetGroup::Dependencies);
        assert_eq!(deps.get("lodash"), Some(&"4.17.21".to_string()));
        assert_eq!(deps.get("jquery"), Some(&"3.6.0".to_string()));
    }

    #[test]
    fn test_missing_npm_section_is_empty() {
        let decl = AssetDeclaration::from_extra(&json!({"public-path": "web"}));
        assert!(decl.is_empty());
    }

    #[test]
    fn test_malformed_shapes_are_empty() {
        // npm not an object
        assert!(AssetDeclaration::from_extra(&json!({"npm": "nope"})).is_empty());
        // sections not objects
        assert!(AssetDeclaration::from_extra(&json!({"npm": {"scripts": 42}})).is_empty());
        // non-string values are skipped
        let decl = AssetDeclaration::from_extra(&json!({
            "npm": {"dependencies": {"a": {"nested": true}, "b": "1.0"}}
        }));
        assert_eq!(decl.group(AssetGroup::Dependencies).len(), 1);
        assert_eq!(
            decl.group(AssetGroup::Dependencies).get("b"),
            Some(&"1.0".to_string())
        );
    }

    #[test]
    fn test_group_key_round_trip() {
        for group in AssetGroup::ALL {
            assert_eq!(AssetGroup::from_key(group.key()), Some(group));
        }
        assert_eq!(AssetGroup::from_key("optionalDependencies"), None);
    }
}
