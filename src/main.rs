#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use mcp_installer::{
    app_config::AppConfig,
    cli::{self, Cli},
    config::Config,
    metadata::Category,
    recommend::{self, USE_CASES},
    registry::{Registry, ServerDescriptor},
    status,
    sync_operations::{self, InstallOutcome, RemoveOutcome},
    time_block, InstallerError,
};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const RULE_WIDTH: usize = 60;

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(cli.debug, cli.trace);

    let Some(command) = cli.command else {
        Cli::command().print_help().context("failed to print top-level help")?;
        println!();
        return Ok(());
    };

    let app_config = load_and_log_config()?;
    let config = Config::resolve(cli.registry_dir, cli.target_config, app_config.as_ref())
        .context("Failed to resolve configuration paths")?;
    log_paths(&config, &command);

    let registry = time_block!("registry load", { Registry::load(&config.registry_dir) })
        .context("Failed to load MCP server registry")?;
    report_registry_issues(&registry);

    dispatch_command(command, &config, &registry)
}

/// Initialize tracing with the specified debug/trace flags
fn initialize_tracing(debug: bool, trace: bool) {
    let log_level = if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(log_level.into()).from_env_lossy())
        .init();
}

/// Load application configuration and log its status
fn load_and_log_config() -> Result<Option<AppConfig>> {
    let app_config = AppConfig::load().context("Failed to load app configuration")?;

    if app_config.is_some() {
        debug!("Loaded app configuration from: {}", AppConfig::config_path()?.display());
    } else {
        debug!("No app configuration file found at: {}", AppConfig::config_path()?.display());
    }

    Ok(app_config)
}

fn log_paths(config: &Config, command: &cli::Commands) {
    debug!("Registry directory: {}", config.registry_dir.display());
    if command.is_mutating() {
        debug!("Target configuration: {}", config.target_config_path.display());
    }
}

fn report_registry_issues(registry: &Registry) {
    for issue in registry.issues() {
        let file = issue.file.file_name().map_or_else(
            || issue.file.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        eprintln!("⚠️  Error reading {file}: {}", issue.reason);
    }
}

/// Dispatch to the appropriate command handler
fn dispatch_command(command: cli::Commands, config: &Config, registry: &Registry) -> Result<()> {
    match command {
        cli::Commands::List { detailed } => {
            print_server_list(registry, detailed);
            Ok(())
        },
        cli::Commands::Install { servers, force } => run_install(config, registry, &servers, force),
        cli::Commands::Remove { servers } => run_remove(config, &servers),
        cli::Commands::Status => run_status(config, registry),
        cli::Commands::Recommend { use_case } => {
            run_recommend(registry, use_case.as_deref());
            Ok(())
        },
    }
}

fn status_glyph(descriptor: &ServerDescriptor) -> &'static str {
    if descriptor.metadata.requires_api_key {
        "🔑"
    } else {
        "✓"
    }
}

fn print_server_list(registry: &Registry, detailed: bool) {
    println!("\n📋 Available MCP Servers");
    println!("{}", "=".repeat(RULE_WIDTH));

    for category in Category::ALL {
        let servers: Vec<_> =
            registry.servers().filter(|s| s.metadata.category == category).collect();
        if servers.is_empty() {
            continue;
        }

        println!("\n{}:", category.title());
        println!("{}", "-".repeat(40));

        for server in servers {
            let meta = server.metadata;
            if detailed {
                println!("\n  {} {}", status_glyph(server), server.name);
                println!("      {}", meta.description);
                if let Some(var) = meta.api_key_var() {
                    println!("      Requires: {var}");
                }
                if let Some(rate_limit) = meta.rate_limit {
                    println!("      Rate limit: {rate_limit}");
                }
                if let Some(note) = meta.note {
                    println!("      Note: {note}");
                }
            } else {
                println!("  {} {:<25} - {}", status_glyph(server), server.name, meta.description);
            }
        }
    }

    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("Legend: ✓ = No API key required, 🔑 = API key required");
    println!("\nInstall with: mcp-installer install <server-name>");
}

fn run_install(config: &Config, registry: &Registry, servers: &[String], force: bool) -> Result<()> {
    let target = &config.target_config_path;
    let existed = target.exists();

    match sync_operations::install_servers(registry, target, servers, force) {
        Ok(outcome) => {
            if !existed {
                println!("⚠️  Claude configuration not found. Creating new configuration...");
            }
            print_install_outcome(registry, &outcome);
            Ok(())
        },
        Err(e) => exit_with_failure(&e, "Installation failed"),
    }
}

fn print_install_outcome(registry: &Registry, outcome: &InstallOutcome) {
    if let Some(backup) = &outcome.backup {
        println!("✓ Created backup: {}", backup.display());
    }

    for name in &outcome.skipped {
        println!("⏭️  Skipping {name} (already configured, use --force to override)");
    }
    for name in &outcome.installed {
        if let Some(descriptor) = registry.get(name) {
            println!("   {}", descriptor.metadata.description);
        }
        println!("✓ Configured: {name}");
    }

    if !outcome.written {
        println!("ℹ️  No servers were installed");
        return;
    }

    println!("\n✅ Successfully installed {} MCP server(s)", outcome.installed.len());
    if !outcome.skipped.is_empty() {
        println!("ℹ️  Skipped {} existing server(s)", outcome.skipped.len());
    }

    if !outcome.api_key_requirements.is_empty() {
        println!("\n⚠️  The following servers require API keys:");
        println!("{}", "-".repeat(40));
        for requirement in &outcome.api_key_requirements {
            println!("  • {}: export {}='your-api-key'", requirement.server, requirement.env_var);
        }
        println!("\nAdd these to your shell profile (~/.zshrc or ~/.bashrc)");
    }
}

fn run_remove(config: &Config, servers: &[String]) -> Result<()> {
    match sync_operations::remove_servers(&config.target_config_path, servers) {
        Ok(outcome) => {
            if print_remove_outcome(&outcome) {
                Ok(())
            } else {
                std::process::exit(1);
            }
        },
        Err(e) => exit_with_failure(&e, "Removal failed"),
    }
}

/// Prints the outcome and returns whether the command succeeded.
fn print_remove_outcome(outcome: &RemoveOutcome) -> bool {
    if !outcome.section_present {
        println!("ℹ️  No MCP servers configured");
        return true;
    }

    if let Some(backup) = &outcome.backup {
        println!("✓ Created backup: {}", backup.display());
    }
    for name in &outcome.removed {
        println!("✓ Removed: {name}");
    }
    for name in &outcome.not_found {
        println!("⏭️  {name} not found in configuration");
    }

    if outcome.written {
        println!("\n✅ Successfully removed {} MCP server(s)", outcome.removed.len());
    }
    outcome.written
}

fn exit_with_failure(err: &InstallerError, context: &str) -> ! {
    debug!("{context}: {err:?}");
    eprintln!("❌ {err}");
    if let Some(backup) = err.unreported_backup() {
        eprintln!("⚠️  {context}. Backup saved at: {}", backup.display());
    }
    std::process::exit(1);
}

fn run_status(config: &Config, registry: &Registry) -> Result<()> {
    let report = status::status(registry, &config.target_config_path)
        .context("Failed to read configuration status")?;

    println!("\n📊 MCP Configuration Status");
    println!("{}", "-".repeat(RULE_WIDTH));
    println!("Configuration file: {}", report.config_path.display());
    println!("Configured servers: {}", report.configured_count());
    println!("Available servers: {}", report.available_count);

    if !report.configured.is_empty() {
        println!("\n✅ Installed Servers:");
        for server in &report.configured {
            let marker = if server.known { "✓" } else { "⚠️  (unknown)" };
            println!("  {marker} {}", server.name);
        }
    }

    if !report.not_installed.is_empty() {
        println!("\n⏸️  Available but not installed:");
        for name in &report.not_installed {
            println!("  • {name}");
        }
    }

    if let Some(latest) = report.backups.last() {
        println!("\n🗂️  Backups: {} (latest: {})", report.backups.len(), latest.display());
    }

    Ok(())
}

fn run_recommend(registry: &Registry, use_case: Option<&str>) {
    let Some(key) = use_case else {
        println!("\n🎯 MCP Server Recommendations by Use Case");
        println!("{}", "=".repeat(RULE_WIDTH));
        for case in USE_CASES {
            println!("\n{}:", case.key);
            println!("  {}", case.description);
            println!("  Servers: {}", case.servers.join(", "));
        }
        println!("\nUsage: mcp-installer recommend <use-case>");
        println!("       mcp-installer install <server-names>");
        return;
    };

    let case = match recommend::resolve(key) {
        Ok(case) => case,
        Err(InstallerError::UnknownUseCase { key, valid }) => {
            println!("❌ Unknown use case: {key}");
            println!("Available: {}", valid.join(", "));
            return;
        },
        Err(e) => {
            println!("❌ {e}");
            return;
        },
    };

    println!("\n🎯 Recommended for {}: {}", case.key, case.description);
    println!("\nRecommended servers:");
    let available = case.available(registry);
    for server in &available {
        println!("  {} {}: {}", status_glyph(server), server.name, server.metadata.description);
    }

    let names: Vec<&str> = available.iter().map(|s| s.name.as_str()).collect();
    if !names.is_empty() {
        println!("\nInstall with: mcp-installer install {}", names.join(" "));
    }
}
