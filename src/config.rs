#![allow(clippy::self_named_module_files)]

use crate::app_config::AppConfig;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub mod reader;
pub mod writer;

/// Key of the one section of the user configuration this tool manages.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// The host application's configuration document.
///
/// Only `mcpServers` is interpreted; every other top-level key is carried
/// through untouched and in its original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserConfig {
    document: Map<String, Value>,
}

impl UserConfig {
    pub const fn from_document(document: Map<String, Value>) -> Self {
        Self { document }
    }

    pub const fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn has_servers_section(&self) -> bool {
        self.document.contains_key(MCP_SERVERS_KEY)
    }

    /// The `mcpServers` section, if present.
    ///
    /// Readers reject documents whose section is not an object, so a
    /// non-object value here is treated as absent.
    pub fn servers(&self) -> Option<&Map<String, Value>> {
        self.document.get(MCP_SERVERS_KEY).and_then(Value::as_object)
    }

    /// The `mcpServers` section, created empty if missing.
    ///
    /// Returns `None` when the existing section is not an object.
    pub fn servers_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.document
            .entry(MCP_SERVERS_KEY)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
    }

    /// Configured server names in document order.
    pub fn server_names(&self) -> Vec<String> {
        self.servers().map(|s| s.keys().cloned().collect()).unwrap_or_default()
    }
}

/// Resolved filesystem locations for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the `*.json` registry fragments.
    pub registry_dir: PathBuf,
    /// The user configuration file that gets mutated.
    pub target_config_path: PathBuf,
}

impl Config {
    /// Resolve paths from explicit overrides, then the app config file, then defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the home or config directory cannot be determined
    /// and no override covers it.
    pub fn resolve(
        registry_dir: Option<PathBuf>,
        target_config: Option<PathBuf>,
        app_config: Option<&AppConfig>,
    ) -> anyhow::Result<Self> {
        let registry_dir = match registry_dir
            .or_else(|| app_config.and_then(|c| c.registry_dir.clone()))
        {
            Some(dir) => dir,
            None => Self::get_config_dir()?.join("servers"),
        };

        let target_config_path = match target_config
            .or_else(|| app_config.and_then(|c| c.target_config.clone()))
        {
            Some(path) => path,
            None => Self::default_target_config_path()?,
        };

        Ok(Self { registry_dir, target_config_path })
    }

    /// Gets the configuration directory path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn get_config_dir() -> anyhow::Result<PathBuf> {
        // Use XDG_CONFIG_HOME or fallback to ~/.config
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("mcp-installer")
        } else {
            home_dir()?.join(".config").join("mcp-installer")
        };
        Ok(config_dir)
    }

    /// `~/.claude.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_target_config_path() -> anyhow::Result<PathBuf> {
        Ok(home_dir()?.join(".claude.json"))
    }
}

fn home_dir() -> anyhow::Result<PathBuf> {
    Ok(directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
        .home_dir()
        .to_path_buf())
}
