use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mcp-installer",
    about = "MCP server configuration manager - install registry servers into ~/.claude.json",
    long_about = "mcp-installer merges MCP (Model Context Protocol) server definitions into the Claude configuration.

Server definitions are read from a registry directory of JSON fragments:
  • $XDG_CONFIG_HOME/mcp-installer/servers/*.json (or ~/.config/mcp-installer/servers/)
    each containing {\"<server>\": {\"command\": ..., \"args\": [...], \"env\": {...}}}

Target file:
  • ~/.claude.json (only the mcpServers section is changed; every other key is kept)

A timestamped backup (~/.claude.json.backup.YYYYMMDD_HHMMSS) is written before every change.",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing registry fragments (*.json)
    #[arg(long, global = true, env = "MCP_INSTALLER_REGISTRY_DIR", value_hint = clap::ValueHint::DirPath)]
    pub registry_dir: Option<PathBuf>,

    /// Override target configuration file path
    #[arg(long, global = true, env = "MCP_INSTALLER_TARGET_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub target_config: Option<PathBuf>,

    /// Enable debug output (shows INFO and DEBUG messages)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace output (shows all log messages including TRACE)
    #[arg(short = 't', long, global = true)]
    pub trace: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available MCP servers
    #[command(long_about = "List available MCP servers grouped by category.

Legend: ✓ = no API key required, 🔑 = API key required

Examples:
  mcp-installer list
  mcp-installer list --detailed")]
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Install MCP servers
    #[command(long_about = "Install MCP servers into the target configuration.

Servers already present are skipped unless --force is given. With no names,
every server in the registry is installed.

Examples:
  mcp-installer install context7
  mcp-installer install notion serena
  mcp-installer install --force magic")]
    Install {
        /// Server names to install (all if omitted)
        #[arg(value_name = "SERVERS")]
        servers: Vec<String>,

        /// Override existing configurations
        #[arg(long)]
        force: bool,
    },

    /// Remove MCP servers
    Remove {
        /// Server names to remove
        #[arg(value_name = "SERVERS", required = true, num_args = 1..)]
        servers: Vec<String>,
    },

    /// Show configuration status
    Status,

    /// Get server recommendations
    #[command(long_about = "Recommend MCP servers for a use case.

Without a use case, every bundle is listed.

Examples:
  mcp-installer recommend
  mcp-installer recommend starter")]
    Recommend {
        /// Use case for recommendations
        #[arg(value_name = "USE_CASE")]
        use_case: Option<String>,
    },
}

impl Commands {
    /// Whether the command may change the target file.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::Install { .. } | Self::Remove { .. })
    }
}
