use std::path::{Path, PathBuf};

/// Name of the merged npm manifest in the project root.
pub const MANIFEST_NAME: &str = "package.json";

/// Lockfile dropped whenever the manifest changes, so npm regenerates it.
pub const LOCKFILE_NAME: &str = "package-lock.json";

/// Directory npm installs into.
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Root package descriptor holding the `extra` metadata.
pub const ROOT_DESCRIPTOR: &str = "composer.json";

/// Installed-package metadata, relative to the vendor directory.
pub const INSTALLED_DESCRIPTOR: &str = "composer/installed.json";

/// Vendor-relative source tree published into the public web root.
pub const ASSET_SOURCE: &str = "byteshard/ui/src/public";

/// Find the project root by walking up from `cwd` looking for the root
/// descriptor or `.git`.
///
/// Returns the first directory containing either marker, or `None` if
/// neither is found.
#[must_use]
pub fn project_root(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(ROOT_DESCRIPTOR).exists() || current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

#[must_use]
pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(MANIFEST_NAME)
}

#[must_use]
pub fn lockfile_path(project_root: &Path) -> PathBuf {
    project_root.join(LOCKFILE_NAME)
}

#[must_use]
pub fn node_modules_path(project_root: &Path) -> PathBuf {
    project_root.join(NODE_MODULES_DIR)
}

#[must_use]
pub fn root_descriptor_path(project_root: &Path) -> PathBuf {
    project_root.join(ROOT_DESCRIPTOR)
}

#[must_use]
pub fn installed_descriptor_path(vendor_dir: &Path) -> PathBuf {
    vendor_dir.join(INSTALLED_DESCRIPTOR)
}

#[must_use]
pub fn asset_source_path(vendor_dir: &Path) -> PathBuf {
    vendor_dir.join(ASSET_SOURCE)
}
