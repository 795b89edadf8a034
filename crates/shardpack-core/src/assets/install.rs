//! Writing the merged manifest and invoking npm.

use super::io::HookIo;
use super::manifest;
use super::reconcile::ReconcileOutcome;
use crate::error::Error;
use crate::paths;
use shardpack_util::proc::{run_with_timeout, OutputStream, RunOutcome};
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Environment variable overriding the npm program (for testing).
pub const NPM_PROGRAM_ENV: &str = "SHARDPACK_NPM";

/// What the installer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    /// Nothing changed; no write, no subprocess.
    UpToDate,
    /// Manifest written but npm is not installed; install skipped.
    NpmMissing,
    /// Manifest written and npm install completed.
    Installed,
}

/// Apply a reconcile outcome: write the manifest, drop the lockfile, and run
/// npm install.
///
/// A no-op when nothing changed. A missing npm executable is reported
/// through `InstallStatus`, not an error, and the written manifest stays in
/// place. A non-zero npm exit or a timeout is fatal; there is no retry and
/// no rollback.
pub fn apply(
    project_root: &Path,
    outcome: &ReconcileOutcome,
    timeout: Duration,
    io: &mut dyn HookIo,
) -> Result<InstallStatus, Error> {
    if !outcome.changed {
        return Ok(InstallStatus::UpToDate);
    }

    manifest::write_manifest(&paths::manifest_path(project_root), &outcome.manifest)?;
    drop_lockfile(project_root)?;
    npm_install(project_root, timeout, io)
}

/// Delete the lockfile so npm regenerates it. Absence is fine.
fn drop_lockfile(project_root: &Path) -> Result<(), Error> {
    match fs::remove_file(paths::lockfile_path(project_root)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn npm_program() -> String {
    std::env::var(NPM_PROGRAM_ENV).unwrap_or_else(|_| "npm".to_string())
}

fn npm_install(
    project_root: &Path,
    timeout: Duration,
    io: &mut dyn HookIo,
) -> Result<InstallStatus, Error> {
    let program = npm_program();

    if which::which(&program).is_err() {
        io.write_error("npm is not installed, please run \"npm install\" on your own");
        return Ok(InstallStatus::NpmMissing);
    }

    let log_level = if io.is_verbose() { "info" } else { "error" };
    let args = [
        "install",
        "--no-audit",
        "--save-exact",
        "--no-optional",
        "--loglevel",
        log_level,
    ];

    io.write(&format!("{program} {}", args.join(" ")));

    let mut cmd = Command::new(&program);
    cmd.args(args).current_dir(project_root);

    let verbose = io.is_verbose();
    let outcome = run_with_timeout(&mut cmd, timeout, |stream, line| {
        if verbose {
            match stream {
                OutputStream::Stdout => io.write(line),
                OutputStream::Stderr => io.write_error(line),
            }
        }
    })?;

    match outcome {
        RunOutcome::Exited(status) if status.success() => Ok(InstallStatus::Installed),
        RunOutcome::Exited(status) => Err(Error::NpmExit {
            code: status.code().unwrap_or(-1),
        }),
        RunOutcome::TimedOut => Err(Error::NpmTimeout {
            secs: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::io::BufferedIo;
    use serde_json::{json, Map, Value};
    use tempfile::tempdir;

    fn outcome(changed: bool) -> ReconcileOutcome {
        let mut manifest = Map::new();
        manifest.insert("private".to_string(), Value::Bool(true));
        ReconcileOutcome {
            manifest,
            changed,
            changes: Vec::new(),
        }
    }

    #[test]
    fn test_unchanged_outcome_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut io = BufferedIo::default();

        let status = apply(
            dir.path(),
            &outcome(false),
            Duration::from_secs(1),
            &mut io,
        )
        .unwrap();

        assert_eq!(status, InstallStatus::UpToDate);
        assert!(!paths::manifest_path(dir.path()).exists());
        assert!(io.lines.is_empty());
    }

    #[test]
    fn test_drop_lockfile_tolerates_absence() {
        let dir = tempdir().unwrap();
        drop_lockfile(dir.path()).unwrap();
    }

    #[test]
    fn test_drop_lockfile_removes_existing() {
        let dir = tempdir().unwrap();
        let lockfile = paths::lockfile_path(dir.path());
        fs::write(&lockfile, "{}").unwrap();

        drop_lockfile(dir.path()).unwrap();
        assert!(!lockfile.exists());
    }

    #[test]
    fn test_changed_outcome_writes_manifest_and_drops_lockfile() {
        // An unresolvable program name takes the warning path, so the write
        // side is observable without npm.
        let dir = tempdir().unwrap();
        let lockfile = paths::lockfile_path(dir.path());
        fs::write(&lockfile, "{}").unwrap();
        let mut io = BufferedIo::default();

        std::env::set_var(NPM_PROGRAM_ENV, "shardpack-test-missing-npm");
        let status = apply(dir.path(), &outcome(true), Duration::from_secs(1), &mut io);
        std::env::remove_var(NPM_PROGRAM_ENV);

        assert_eq!(status.unwrap(), InstallStatus::NpmMissing);
        assert!(!lockfile.exists());
        let written: Value =
            serde_json::from_str(&fs::read_to_string(paths::manifest_path(dir.path())).unwrap())
                .unwrap();
        assert_eq!(written, json!({"private": true}));
        assert!(io.errors.iter().any(|line| line.contains("npm is not installed")));
    }
}
