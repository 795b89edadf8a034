#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use shardpack_core::assets::HookEvent;
use shardpack_core::config::DEFAULT_NPM_TIMEOUT_SECS;
use shardpack_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shardpack")]
#[command(author, version, about = "npm asset aggregation hook for byteShard projects", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted logs (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the project root
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Override the vendor directory (defaults to <cwd>/vendor)
    #[arg(long, global = true, value_name = "PATH")]
    vendor_dir: Option<PathBuf>,

    /// Timeout for the npm install subprocess, in seconds
    #[arg(long, global = true, value_name = "SECS", default_value_t = DEFAULT_NPM_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the post-install hook: install npm assets, then publish
    PostInstall,

    /// Run the post-update hook: install npm assets, then publish
    PostUpdate,

    /// Install npm assets without publishing
    Install,

    /// Publish vendor assets into the public web root
    Publish {
        /// Leave existing destination files untouched
        #[arg(long)]
        keep_existing: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine the project root
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);

    let mut config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_npm_timeout_secs(cli.timeout);
    if let Some(vendor_dir) = cli.vendor_dir {
        config = config.with_vendor_dir(vendor_dir);
    }

    logging::init(cli.verbose, cli.json);

    match cli.command {
        Commands::PostInstall => commands::hook::run(HookEvent::PostInstall, &config),
        Commands::PostUpdate => commands::hook::run(HookEvent::PostUpdate, &config),
        Commands::Install => commands::install::run(&config),
        Commands::Publish { keep_existing } => commands::publish::run(&config, !keep_existing),
    }
}
