use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Atomically write bytes to a file by writing to a temp file then renaming.
///
/// The file will either have the old contents or the new contents, never a
/// partial write.
///
/// # Errors
/// Returns an error if the write or rename fails.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // Temp file must live in the same directory so the rename stays on one
    // filesystem.
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    match tmp.persist(path) {
        Ok(_) => Ok(()),
        Err(err) => {
            // Windows cannot rename over an existing file; fall back to copy.
            if cfg!(windows) {
                fs::copy(err.file.path(), path)?;
                Ok(())
            } else {
                Err(err.error)
            }
        }
    }
}

/// Recursively copy every file and subdirectory from `src` into `dst`.
///
/// Directories are created as needed. When `force` is true existing
/// destination files are overwritten; otherwise they are left untouched.
/// Returns the number of files copied.
///
/// # Errors
/// Returns an error if the walk, directory creation, or a file copy fails.
pub fn copy_dir(src: &Path, dst: &Path, force: bool) -> io::Result<u64> {
    let mut copied = 0u64;
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if force || !target.exists() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
