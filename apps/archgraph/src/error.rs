//! # CLI Errors
//!
//! Everything that can stop a `dash` run. Store failures pass through
//! unchanged; the rest cover files, configuration and usage.

use archgraph_core::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the `dash` tool.
#[derive(Debug, Error)]
pub enum DashError {
    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading or writing a file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `--data` names a file that does not exist.
    #[error("Data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    /// Neither `--out` nor `--data` was given for a tool that writes.
    #[error("No output path specified. Use --out or --data")]
    NoOutputPath,

    /// The configuration file is unreadable or holds invalid values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The tool name is not in the registry.
    #[error("Unknown tool \"{name}\". Available tools: {available}")]
    UnknownTool { name: String, available: String },

    /// Bad or missing tool arguments.
    #[error("{0}")]
    Usage(String),
}

impl DashError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
