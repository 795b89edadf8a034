use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default bound on the npm install subprocess, in seconds.
pub const DEFAULT_NPM_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration for a shardpack hook run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project root. The manifest, lockfile, node_modules and public
    /// directory all live here.
    pub cwd: PathBuf,

    /// Directory holding installed vendor packages.
    pub vendor_dir: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Bound on the npm install subprocess, in seconds.
    pub npm_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vendor_dir: cwd.join("vendor"),
            cwd,
            json_logs: false,
            verbosity: 0,
            npm_timeout_secs: DEFAULT_NPM_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Create a new config rooted at the given project directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            vendor_dir: cwd.join("vendor"),
            cwd,
            json_logs: false,
            verbosity: 0,
            npm_timeout_secs: DEFAULT_NPM_TIMEOUT_SECS,
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Override the vendor directory.
    #[must_use]
    pub fn with_vendor_dir(mut self, vendor_dir: PathBuf) -> Self {
        self.vendor_dir = vendor_dir;
        self
    }

    /// Override the npm install timeout.
    #[must_use]
    pub fn with_npm_timeout_secs(mut self, secs: u64) -> Self {
        self.npm_timeout_secs = secs;
        self
    }

    /// Whether subprocess output should reach the console.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity > 0
    }

    /// The npm install timeout as a `Duration`.
    #[must_use]
    pub fn npm_timeout(&self) -> Duration {
        Duration::from_secs(self.npm_timeout_secs)
    }
}
