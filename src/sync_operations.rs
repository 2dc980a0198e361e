//! Install and remove operations against the user configuration file.
//!
//! Both operations validate their input before touching the filesystem, take
//! a timestamped backup of the existing file, and write only when something
//! actually changed. There is no file locking: two concurrent runs against
//! the same file can lose one another's changes, and the backup is the only
//! recovery path. Nothing is ever restored automatically.

use crate::config::{reader, writer, UserConfig};
use crate::merge::{self, MergeStrategy};
use crate::registry::Registry;
use crate::InstallerError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An installed server whose process needs an API key in its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyRequirement {
    pub server: String,
    pub env_var: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOutcome {
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
    pub backup: Option<PathBuf>,
    pub written: bool,
    pub api_key_requirements: Vec<ApiKeyRequirement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: Vec<String>,
    pub not_found: Vec<String>,
    pub backup: Option<PathBuf>,
    pub written: bool,
    /// False when the file had no `mcpServers` section at all.
    pub section_present: bool,
}

/// Install `requested` servers (all registry servers when empty) into `target`.
///
/// # Errors
///
/// - [`InstallerError::UnknownServers`] if any name is not in the registry;
///   nothing is backed up or written in that case.
/// - [`InstallerError::Backup`] if the backup copy fails.
/// - [`InstallerError::MalformedUserConfig`] if the existing file cannot be parsed.
/// - [`InstallerError::PersistFailed`] if the final write fails; it carries
///   the backup path.
pub fn install_servers(
    registry: &Registry,
    target: &Path,
    requested: &[String],
    force: bool,
) -> Result<InstallOutcome, InstallerError> {
    let names: Vec<String> = if requested.is_empty() {
        registry.names().map(str::to_string).collect()
    } else {
        requested.to_vec()
    };

    let unknown = registry.unknown_names(&names);
    if !unknown.is_empty() {
        return Err(InstallerError::UnknownServers(
            unknown.into_iter().map(str::to_string).collect(),
        ));
    }

    let backup = take_backup(target)?;
    let mut config =
        reader::read_user_config(target).map_err(|e| attach_backup(e, backup.as_deref()))?;
    let servers =
        config.servers_mut().ok_or_else(|| section_not_object(target, backup.as_deref()))?;

    let entries = names.iter().filter_map(|name| {
        registry.get(name).map(|descriptor| (name.as_str(), &descriptor.launch_config))
    });
    let report = merge::merge_servers(servers, entries, MergeStrategy::from_force(force));

    let written = !report.installed.is_empty();
    if written {
        persist(target, &config, backup.as_deref())?;
        info!("Installed {} server(s) into {}", report.installed.len(), target.display());
    } else {
        debug!("No servers installed; {} left untouched", target.display());
    }

    let api_key_requirements = report
        .installed
        .iter()
        .filter_map(|name| {
            let env_var = registry.get(name)?.metadata.api_key_var()?;
            Some(ApiKeyRequirement { server: name.clone(), env_var: env_var.to_string() })
        })
        .collect();

    Ok(InstallOutcome {
        installed: report.installed,
        skipped: report.skipped,
        backup,
        written,
        api_key_requirements,
    })
}

/// Remove `names` from the `mcpServers` section of `target`.
///
/// # Errors
///
/// - [`InstallerError::EmptySelection`] if `names` is empty.
/// - [`InstallerError::MalformedUserConfig`] if the existing file cannot be parsed.
/// - [`InstallerError::Backup`] / [`InstallerError::PersistFailed`] on I/O failure.
pub fn remove_servers(target: &Path, names: &[String]) -> Result<RemoveOutcome, InstallerError> {
    if names.is_empty() {
        return Err(InstallerError::EmptySelection);
    }

    let mut config = reader::read_user_config(target)?;
    if !config.has_servers_section() {
        debug!("{} has no mcpServers section", target.display());
        return Ok(RemoveOutcome::default());
    }

    let backup = take_backup(target)?;
    let servers =
        config.servers_mut().ok_or_else(|| section_not_object(target, backup.as_deref()))?;
    let report = merge::remove_servers(servers, names);

    let written = !report.removed.is_empty();
    if written {
        persist(target, &config, backup.as_deref())?;
        info!("Removed {} server(s) from {}", report.removed.len(), target.display());
    }

    Ok(RemoveOutcome {
        removed: report.removed,
        not_found: report.not_found,
        backup,
        written,
        section_present: true,
    })
}

fn attach_backup(err: InstallerError, backup: Option<&Path>) -> InstallerError {
    match err {
        InstallerError::MalformedUserConfig { path, reason, .. } => {
            let backup = backup.map(Path::to_path_buf);
            InstallerError::MalformedUserConfig { path, reason, backup }
        },
        other => other,
    }
}

fn section_not_object(target: &Path, backup: Option<&Path>) -> InstallerError {
    InstallerError::MalformedUserConfig {
        path: target.to_path_buf(),
        reason: format!("`{}` is not a JSON object", crate::config::MCP_SERVERS_KEY),
        backup: backup.map(Path::to_path_buf),
    }
}

fn take_backup(target: &Path) -> Result<Option<PathBuf>, InstallerError> {
    writer::backup_file(target)
        .map_err(|source| InstallerError::Backup { path: target.to_path_buf(), source })
}

fn persist(target: &Path, config: &UserConfig, backup: Option<&Path>) -> Result<(), InstallerError> {
    writer::write_user_config(target, config).map_err(|source| InstallerError::PersistFailed {
        path: target.to_path_buf(),
        backup: backup.map(Path::to_path_buf),
        source,
    })
}
