//! Loading the server registry from a directory of JSON fragments.
//!
//! Each fragment is a flat object `{ "<server>": { <launch config> } }`.
//! Fragments are applied in ascending file-name order; when two fragments
//! define the same server the later file wins and the collision is recorded.

use crate::metadata::{self, ServerMetadata};
use crate::InstallerError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension a file must carry to be treated as a fragment.
pub const FRAGMENT_EXTENSION: &str = "json";

/// One installable server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDescriptor {
    pub name: String,
    /// Opaque object copied verbatim into the user configuration.
    pub launch_config: Value,
    pub metadata: &'static ServerMetadata,
    /// Fragment file this definition came from.
    pub source: PathBuf,
}

/// A fragment that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentIssue {
    pub file: PathBuf,
    pub reason: String,
}

/// A server name defined by more than one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub name: String,
    pub overridden: PathBuf,
    pub winner: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    servers: BTreeMap<String, ServerDescriptor>,
    issues: Vec<FragmentIssue>,
    collisions: Vec<NameCollision>,
}

impl Registry {
    /// Load every `*.json` fragment in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::RegistryDirNotFound`] if `dir` does not exist
    /// or is not a directory, and an I/O error if the directory listing
    /// itself fails. Broken fragments are recorded in [`Registry::issues`].
    pub fn load(dir: &Path) -> Result<Self, InstallerError> {
        if !dir.is_dir() {
            return Err(InstallerError::RegistryDirNotFound(dir.to_path_buf()));
        }

        let mut registry = Self::default();
        for path in fragment_files(dir)? {
            match read_fragment(&path) {
                Ok(entries) => registry.merge_fragment(&path, entries),
                Err(reason) => {
                    debug!("Skipping fragment {}: {reason}", path.display());
                    registry.issues.push(FragmentIssue { file: path, reason });
                },
            }
        }

        debug!(
            "Loaded {} server(s) from {} ({} skipped fragment(s))",
            registry.servers.len(),
            dir.display(),
            registry.issues.len()
        );
        Ok(registry)
    }

    /// Build a registry from already-parsed entries, as if they came from one fragment.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut registry = Self::default();
        registry.merge_fragment(Path::new("<memory>"), entries.into_iter().collect());
        registry
    }

    fn merge_fragment(&mut self, path: &Path, entries: Map<String, Value>) {
        for (name, launch_config) in entries {
            debug!("  - {name} ({})", path.display());
            let descriptor = ServerDescriptor {
                metadata: metadata::lookup(&name),
                name: name.clone(),
                launch_config,
                source: path.to_path_buf(),
            };
            if let Some(previous) = self.servers.insert(name.clone(), descriptor) {
                warn!(
                    "Server '{name}' from {} overrides the definition in {}",
                    path.display(),
                    previous.source.display()
                );
                self.collisions.push(NameCollision {
                    name,
                    overridden: previous.source,
                    winner: path.to_path_buf(),
                });
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ServerDescriptor> {
        self.servers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Server names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    pub fn servers(&self) -> impl Iterator<Item = &ServerDescriptor> {
        self.servers.values()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn issues(&self) -> &[FragmentIssue] {
        &self.issues
    }

    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Requested names the registry does not know, in request order.
    pub fn unknown_names<'a>(&self, requested: &'a [String]) -> Vec<&'a str> {
        requested.iter().map(String::as_str).filter(|name| !self.contains(name)).collect()
    }
}

fn fragment_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(FRAGMENT_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn read_fragment(path: &Path) -> Result<Map<String, Value>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("unreadable: {e}"))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    let Value::Object(entries) = value else {
        return Err("fragment is not a JSON object".to_string());
    };

    if let Some((name, _)) = entries.iter().find(|(_, config)| !config.is_object()) {
        return Err(format!("launch config for '{name}' is not a JSON object"));
    }

    Ok(entries)
}
