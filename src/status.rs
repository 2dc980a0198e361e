use crate::config::{reader, UserConfig};
use crate::registry::Registry;
use crate::InstallerError;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A configured server and whether the current registry knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredServer {
    pub name: String,
    pub known: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub config_path: PathBuf,
    pub configured: Vec<ConfiguredServer>,
    pub available_count: usize,
    /// Registry servers not yet configured, sorted.
    pub not_installed: Vec<String>,
    /// Configured servers the registry does not know, in document order.
    pub unknown: Vec<String>,
    /// Backups of `config_path`, oldest first.
    pub backups: Vec<PathBuf>,
}

impl StatusReport {
    pub fn configured_count(&self) -> usize {
        self.configured.len()
    }
}

/// Compare the configuration at `config_path` against `registry`.
///
/// # Errors
///
/// Returns an error if the configuration exists but cannot be parsed, or if
/// its directory cannot be listed.
pub fn status(registry: &Registry, config_path: &Path) -> Result<StatusReport, InstallerError> {
    let config = reader::read_user_config(config_path)?;
    let mut report = compare(registry, &config);
    report.config_path = config_path.to_path_buf();
    report.backups = list_backups(config_path)?;
    Ok(report)
}

/// Set differences between configured and available names.
pub fn compare(registry: &Registry, config: &UserConfig) -> StatusReport {
    let configured_names = config.server_names();
    let configured_set: BTreeSet<&str> = configured_names.iter().map(String::as_str).collect();

    let configured = configured_names
        .iter()
        .map(|name| ConfiguredServer { name: name.clone(), known: registry.contains(name) })
        .collect::<Vec<_>>();

    let not_installed = registry
        .names()
        .filter(|name| !configured_set.contains(name))
        .map(str::to_string)
        .collect();

    let unknown = configured.iter().filter(|s| !s.known).map(|s| s.name.clone()).collect();

    StatusReport {
        config_path: PathBuf::new(),
        configured,
        available_count: registry.len(),
        not_installed,
        unknown,
        backups: Vec::new(),
    }
}

/// Backup files written for `config_path`, oldest first.
///
/// # Errors
///
/// Returns an error if the containing directory exists but cannot be read.
pub fn list_backups(config_path: &Path) -> Result<Vec<PathBuf>, InstallerError> {
    let Some(file_name) = config_path.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = Regex::new(&format!(
        r"^{}\.backup\.(\d{{8}}_\d{{6}})(?:\.(\d+))?$",
        regex::escape(file_name)
    ))
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let mut backups = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(captures) = name.to_str().and_then(|n| pattern.captures(n)) else {
            continue;
        };
        let timestamp = captures[1].to_string();
        let counter: u32 = captures.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        backups.push((timestamp, counter, entry.path()));
    }

    backups.sort();
    Ok(backups.into_iter().map(|(_, _, path)| path).collect())
}
