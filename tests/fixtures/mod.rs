#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::fs;
use std::path::PathBuf;

/// Test fixture with a registry directory and a fake home directory
pub struct TestFixture {
    /// Temporary directory that will be cleaned up on drop
    pub temp: TempDir,
    /// Directory of registry fragments
    pub registry: PathBuf,
    /// Stand-in for `$HOME`
    pub home: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directories
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new().map_err(std::io::Error::other)?;
        let registry_dir = temp_dir.child("configs");
        let home_dir = temp_dir.child("home");

        registry_dir.create_dir_all().map_err(std::io::Error::other)?;
        home_dir.create_dir_all().map_err(std::io::Error::other)?;

        Ok(Self {
            registry: registry_dir.to_path_buf(),
            home: home_dir.to_path_buf(),
            temp: temp_dir,
        })
    }

    /// Path of the user configuration the CLI mutates
    pub fn target(&self) -> PathBuf {
        self.home.join(".claude.json")
    }

    /// The user configuration as an `assert_fs` child, for path assertions
    pub fn target_file(&self) -> ChildPath {
        self.temp.child("home/.claude.json")
    }

    /// Write a registry fragment
    pub fn with_fragment(&self, file: &str, content: &str) -> std::io::Result<&Self> {
        fs::write(self.registry.join(file), content)?;
        Ok(self)
    }

    /// Write the existing user configuration
    pub fn with_user_config(&self, content: &str) -> std::io::Result<&Self> {
        fs::write(self.target(), content)?;
        Ok(self)
    }

    pub fn read_user_config(&self) -> std::io::Result<String> {
        fs::read_to_string(self.target())
    }

    pub fn user_config_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_user_config().unwrap()).unwrap()
    }

    /// Backup files next to the user configuration, sorted by name
    pub fn backups(&self) -> Vec<PathBuf> {
        let mut backups: Vec<PathBuf> = fs::read_dir(&self.home)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().contains(".claude.json.backup."))
            .collect();
        backups.sort();
        backups
    }

    /// The binary, pointed at this fixture's registry and target
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mcp-installer"));
        cmd.env("XDG_CONFIG_HOME", self.temp.path().join("xdg"))
            .env("HOME", &self.home)
            .env("MCP_INSTALLER_REGISTRY_DIR", &self.registry)
            .env("MCP_INSTALLER_TARGET_CONFIG", self.target())
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Builder pattern for creating test fixtures with default content
pub struct TestFixtureBuilder {
    fixture: TestFixture,
}

impl TestFixtureBuilder {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self { fixture: TestFixture::new()? })
    }

    /// Registry with `serena` (no key) and `notion` (needs `NOTION_TOKEN`)
    pub fn with_default_registry(self) -> std::io::Result<Self> {
        self.fixture.with_fragment(
            "serena.json",
            r#"{
            "serena": {
                "command": "uvx",
                "args": ["--from", "git+https://github.com/oraios/serena", "serena-mcp-server"]
            }
        }"#,
        )?;
        self.fixture.with_fragment(
            "notion.json",
            r#"{
            "notion": {
                "command": "node",
                "args": ["mcp/notion/src/notion-mcp-wrapper.js"],
                "env": {"NOTION_TOKEN": "${NOTION_TOKEN}"}
            }
        }"#,
        )?;
        Ok(self)
    }

    /// Existing configuration with unrelated keys and one server
    pub fn with_existing_user_config(self) -> std::io::Result<Self> {
        self.fixture.with_user_config(
            r#"{
  "numStartups": 12,
  "mcpServers": {
    "serena": {
      "command": "my-own-serena"
    }
  },
  "theme": "dark"
}
"#,
        )?;
        Ok(self)
    }

    /// Build and return the fixture
    pub fn build(self) -> TestFixture {
        self.fixture
    }
}
