use crate::assets::extra::AssetGroup;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shardpack operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {}: {source}; check that the file is readable", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}; make sure it contains valid JSON", .path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("conflicting npm resources, type: {group}, resources: \"{}\"", .names.join("\", \""))]
    AssetConflict {
        group: AssetGroup,
        names: Vec<String>,
    },

    #[error("npm install failed with exit code {code}")]
    NpmExit { code: i32 },

    #[error("npm install timed out after {secs}s")]
    NpmTimeout { secs: u64 },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
