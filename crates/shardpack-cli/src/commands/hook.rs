//! Lifecycle hook commands: post-install and post-update.

use super::ConsoleIo;
use miette::{IntoDiagnostic, Result};
use shardpack_core::assets::{run_hook, HookEvent, InstallStatus};
use shardpack_core::Config;
use tracing::{info, warn};

pub fn run(event: HookEvent, config: &Config) -> Result<()> {
    info!(event = %event, cwd = %config.cwd.display(), "running lifecycle hook");

    let mut io = ConsoleIo::new(config.is_verbose());
    let status = run_hook(config, &mut io).into_diagnostic()?;

    match status {
        InstallStatus::UpToDate => info!("package.json up to date"),
        InstallStatus::NpmMissing => warn!("npm not found; asset install skipped"),
        InstallStatus::Installed => info!("npm assets installed"),
    }

    Ok(())
}
