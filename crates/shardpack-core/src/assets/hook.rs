//! Lifecycle hook orchestration: install assets, then publish.

use super::collect::merge_assets;
use super::extra::AssetDeclaration;
use super::install::{self, InstallStatus};
use super::installed;
use super::io::HookIo;
use super::manifest;
use super::publish;
use super::reconcile;
use crate::config::Config;
use crate::error::Error;
use crate::paths;
use std::fmt;

/// Lifecycle events this hook responds to. Both map to the same routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    PostInstall,
    PostUpdate,
}

impl HookEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostInstall => "post-install",
            Self::PostUpdate => "post-update",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the full hook: install/update assets, then publish.
///
/// Steps run synchronously in that fixed order; a failure in the install
/// phase aborts the publish phase.
pub fn run_hook(config: &Config, io: &mut dyn HookIo) -> Result<InstallStatus, Error> {
    let status = install_assets(config, io)?;
    publish_assets(config, true, io)?;
    Ok(status)
}

/// Collect, reconcile, and install npm assets.
pub fn install_assets(config: &Config, io: &mut dyn HookIo) -> Result<InstallStatus, Error> {
    let root_extra = installed::read_root_extra(&config.cwd)?;
    let packages = installed::read_installed_packages(&config.vendor_dir)?;

    let root_decl = AssetDeclaration::from_extra(&root_extra);
    let decls: Vec<AssetDeclaration> = packages
        .iter()
        .map(|package| AssetDeclaration::from_extra(&package.extra))
        .collect();

    let merged = merge_assets(&decls, &root_decl)?;

    let existing = manifest::read_manifest(&paths::manifest_path(&config.cwd))?;
    let node_modules_present = paths::node_modules_path(&config.cwd).is_dir();
    let outcome = reconcile::reconcile(&merged, existing, node_modules_present);

    for change in &outcome.changes {
        io.write(&change.to_string());
    }

    install::apply(&config.cwd, &outcome, config.npm_timeout(), io)
}

/// Publish the vendor UI assets into the public web root.
pub fn publish_assets(config: &Config, force: bool, io: &mut dyn HookIo) -> Result<u64, Error> {
    let root_extra = installed::read_root_extra(&config.cwd)?;
    publish::publish(&config.cwd, &config.vendor_dir, &root_extra, force, io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::io::BufferedIo;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_installed(vendor_dir: &Path, packages: serde_json::Value) {
        let path = paths::installed_descriptor_path(vendor_dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json!({ "packages": packages }).to_string()).unwrap();
    }

    fn project_config(root: &Path) -> Config {
        Config::new(root.to_path_buf())
    }

    #[test]
    fn test_install_assets_is_stable_without_changes() {
        let dir = tempdir().unwrap();
        write_installed(
            &dir.path().join("vendor"),
            json!([{"name": "acme/ui", "extra": {"npm": {"dependencies": {"a": "1.0"}}}}]),
        );
        fs::write(
            paths::manifest_path(dir.path()),
            "{\n  \"dependencies\": {\n    \"a\": \"1.0\"\n  }\n}\n",
        )
        .unwrap();
        fs::create_dir_all(paths::node_modules_path(dir.path())).unwrap();
        let before = fs::read_to_string(paths::manifest_path(dir.path())).unwrap();

        let mut io = BufferedIo::default();
        let status = install_assets(&project_config(dir.path()), &mut io).unwrap();

        assert_eq!(status, InstallStatus::UpToDate);
        assert!(io.lines.is_empty());
        let after = fs::read_to_string(paths::manifest_path(dir.path())).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_install_assets_notifies_and_surfaces_conflicts() {
        let dir = tempdir().unwrap();
        write_installed(
            &dir.path().join("vendor"),
            json!([
                {"name": "acme/a", "extra": {"npm": {"dependencies": {"lodash": "1.0"}}}},
                {"name": "acme/b", "extra": {"npm": {"dependencies": {"lodash": "2.0"}}}}
            ]),
        );

        let mut io = BufferedIo::default();
        let err = install_assets(&project_config(dir.path()), &mut io).unwrap_err();

        assert!(matches!(err, Error::AssetConflict { .. }));
        assert!(err.to_string().contains("lodash"));
        // Nothing written before the merge failed.
        assert!(!paths::manifest_path(dir.path()).exists());
    }

    #[test]
    fn test_run_hook_installs_then_publishes() {
        let dir = tempdir().unwrap();
        let vendor = dir.path().join("vendor");
        write_installed(&vendor, json!([]));
        let source = paths::asset_source_path(&vendor);
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("app.css"), "body{}").unwrap();
        // Empty merge over an up-to-date manifest: install is a no-op.
        fs::write(paths::manifest_path(dir.path()), "{}\n").unwrap();
        fs::create_dir_all(paths::node_modules_path(dir.path())).unwrap();

        let mut io = BufferedIo::default();
        let status = run_hook(&project_config(dir.path()), &mut io).unwrap();

        assert_eq!(status, InstallStatus::UpToDate);
        assert!(dir.path().join("public").join("app.css").exists());
    }

    #[test]
    fn test_hook_event_names() {
        assert_eq!(HookEvent::PostInstall.as_str(), "post-install");
        assert_eq!(HookEvent::PostUpdate.as_str(), "post-update");
    }
}
