#![allow(clippy::self_named_module_files)]

use serde_json::{Map, Value};
use tracing::debug;

pub mod strategy;

pub use strategy::MergeStrategy;

/// Outcome of merging registry entries into an `mcpServers` section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Outcome of removing names from an `mcpServers` section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    pub not_found: Vec<String>,
}

/// Copy launch configs into `servers`, in the order given.
///
/// A name that appears more than once is handled at its first occurrence
/// only.
pub fn merge_servers<'a, I>(
    servers: &mut Map<String, Value>,
    entries: I,
    strategy: MergeStrategy,
) -> MergeReport
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut report = MergeReport::default();

    for (name, launch_config) in entries {
        if report.installed.iter().chain(&report.skipped).any(|seen| seen == name) {
            continue;
        }

        if servers.contains_key(name) && strategy == MergeStrategy::PreserveExisting {
            debug!("Skipping {name}: already configured");
            report.skipped.push(name.to_string());
            continue;
        }

        servers.insert(name.to_string(), launch_config.clone());
        report.installed.push(name.to_string());
    }

    report
}

/// Remove each name from `servers` if present.
pub fn remove_servers<S: AsRef<str>>(servers: &mut Map<String, Value>, names: &[S]) -> RemovalReport {
    let mut report = RemovalReport::default();

    for name in names.iter().map(AsRef::as_ref) {
        if servers.shift_remove(name).is_some() {
            report.removed.push(name.to_string());
        } else if !report.removed.iter().any(|r| r == name) {
            report.not_found.push(name.to_string());
        }
    }

    report
}
