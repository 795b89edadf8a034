//! Publishing the vendor UI's static assets into the public web root.

use super::io::HookIo;
use crate::error::Error;
use crate::paths;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Root extras key overriding the public directory name.
pub const PUBLIC_PATH_KEY: &str = "public-path";

/// Default public directory, relative to the project root.
pub const DEFAULT_PUBLIC_PATH: &str = "public";

/// Destination directory for published assets.
#[must_use]
pub fn public_dir(project_root: &Path, root_extra: &Value) -> PathBuf {
    let public_path = root_extra
        .get(PUBLIC_PATH_KEY)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PUBLIC_PATH);
    project_root.join(public_path)
}

/// Copy the vendor asset tree into the public web root.
///
/// Existing destination files are overwritten when `force` is true. A
/// missing source tree (UI package not installed) is skipped with a warning
/// rather than failing the hook; genuine I/O failures propagate. Returns the
/// number of files copied.
pub fn publish(
    project_root: &Path,
    vendor_dir: &Path,
    root_extra: &Value,
    force: bool,
    io: &mut dyn HookIo,
) -> Result<u64, Error> {
    let source = paths::asset_source_path(vendor_dir);
    if !source.is_dir() {
        io.write_error(&format!(
            "asset source {} not found, skipping publish",
            source.display()
        ));
        return Ok(0);
    }

    let destination = public_dir(project_root, root_extra);
    fs::create_dir_all(&destination)?;
    let copied = shardpack_util::fs::copy_dir(&source, &destination, force)?;
    Ok(copied)
}
