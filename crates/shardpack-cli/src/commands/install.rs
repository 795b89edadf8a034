//! `shardpack install` command: install npm assets without publishing.

use super::ConsoleIo;
use miette::{IntoDiagnostic, Result};
use shardpack_core::assets::{install_assets, InstallStatus};
use shardpack_core::Config;
use tracing::{info, warn};

pub fn run(config: &Config) -> Result<()> {
    info!(cwd = %config.cwd.display(), "installing npm assets");

    let mut io = ConsoleIo::new(config.is_verbose());
    let status = install_assets(config, &mut io).into_diagnostic()?;

    match status {
        InstallStatus::UpToDate => info!("package.json up to date"),
        InstallStatus::NpmMissing => warn!("npm not found; asset install skipped"),
        InstallStatus::Installed => info!("npm assets installed"),
    }

    Ok(())
}
