#![allow(missing_docs)]

use std::path::PathBuf;

pub mod app_config;
pub mod cli;
pub mod config;
pub mod merge;
pub mod metadata;
pub mod profiling;
pub mod recommend;
pub mod registry;
pub mod status;
pub mod sync_operations;

pub use config::{Config, UserConfig};
pub use merge::{merge_servers, MergeStrategy};
pub use registry::{Registry, ServerDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum InstallerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MCP registry directory not found: {}", .0.display())]
    RegistryDirNotFound(PathBuf),

    #[error("Malformed configuration at {}: {reason}", path.display())]
    MalformedUserConfig {
        path: PathBuf,
        reason: String,
        /// Backup taken before the file was parsed, if any.
        backup: Option<PathBuf>,
    },

    #[error("Unknown servers: {}", .0.join(", "))]
    UnknownServers(Vec<String>),

    #[error("Unknown use case: {key} (available: {})", valid.join(", "))]
    UnknownUseCase { key: String, valid: Vec<String> },

    #[error("No server names given")]
    EmptySelection,

    #[error("Failed to back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save configuration {}{}: {source}",
        path.display(),
        backup.as_ref().map(|b| format!(" (restore from {})", b.display())).unwrap_or_default())]
    PersistFailed {
        path: PathBuf,
        backup: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl InstallerError {
    /// Backup taken before the operation failed, if any.
    pub fn backup_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PersistFailed { backup, .. } | Self::MalformedUserConfig { backup, .. } => {
                backup.as_deref()
            },
            _ => None,
        }
    }

    /// Backup path that the error message does not already name.
    pub fn unreported_backup(&self) -> Option<&std::path::Path> {
        match self {
            Self::PersistFailed { .. } => None,
            _ => self.backup_path(),
        }
    }
}
