//! `shardpack publish` command: publish vendor assets to the public root.

use super::ConsoleIo;
use miette::{IntoDiagnostic, Result};
use shardpack_core::assets::publish_assets;
use shardpack_core::Config;
use tracing::info;

pub fn run(config: &Config, force: bool) -> Result<()> {
    let mut io = ConsoleIo::new(config.is_verbose());
    let copied = publish_assets(config, force, &mut io).into_diagnostic()?;

    info!(copied, "published assets");
    Ok(())
}
