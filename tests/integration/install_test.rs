use crate::fixtures::TestFixtureBuilder;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_creates_config() {
        let fixture = TestFixtureBuilder::new().unwrap().with_default_registry().unwrap().build();

        fixture.command().args(["install", "serena"]).assert().success().stdout(
            predicate::str::contains("Creating new configuration")
                .and(predicate::str::contains("✓ Configured: serena"))
                .and(predicate::str::contains("Successfully installed 1 MCP server(s)")),
        );

        fixture.target_file().assert(predicate::path::is_file());
        let config = fixture.user_config_json();
        assert_eq!(config["mcpServers"]["serena"]["command"], "uvx");
        assert!(fixture.backups().is_empty());
    }

    #[test]
    fn test_install_all_advises_api_keys() {
        let fixture = TestFixtureBuilder::new().unwrap().with_default_registry().unwrap().build();

        fixture.command().arg("install").assert().success().stdout(
            predicate::str::contains("Successfully installed 2 MCP server(s)")
                .and(predicate::str::contains("notion: export NOTION_TOKEN='your-api-key'")),
        );

        let config = fixture.user_config_json();
        assert!(config["mcpServers"]["serena"].is_object());
        assert!(config["mcpServers"]["notion"].is_object());
    }

    #[test]
    fn test_install_existing_is_skipped() {
        let fixture = TestFixtureBuilder::new()
            .unwrap()
            .with_default_registry()
            .unwrap()
            .with_existing_user_config()
            .unwrap()
            .build();
        let before = fixture.read_user_config().unwrap();

        fixture.command().args(["install", "serena"]).assert().success().stdout(
            predicate::str::contains("Skipping serena (already configured")
                .and(predicate::str::contains("No servers were installed")),
        );

        assert_eq!(fixture.read_user_config().unwrap(), before);
    }

    #[test]
    fn test_install_force_overwrites_and_backs_up() {
        let fixture = TestFixtureBuilder::new()
            .unwrap()
            .with_default_registry()
            .unwrap()
            .with_existing_user_config()
            .unwrap()
            .build();
        let before = fixture.read_user_config().unwrap();

        fixture
            .command()
            .args(["install", "serena", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created backup"));

        let config = fixture.user_config_json();
        assert_eq!(config["mcpServers"]["serena"]["command"], "uvx");
        assert_eq!(config["numStartups"], json!(12));
        assert_eq!(config["theme"], "dark");

        let backups = fixture.backups();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), before);
    }

    #[test]
    fn test_install_unknown_fails_without_changes() {
        let fixture = TestFixtureBuilder::new()
            .unwrap()
            .with_default_registry()
            .unwrap()
            .with_existing_user_config()
            .unwrap()
            .build();
        let before = fixture.read_user_config().unwrap();

        fixture
            .command()
            .args(["install", "notion", "ghost"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Unknown servers: ghost"));

        assert_eq!(fixture.read_user_config().unwrap(), before);
        assert!(fixture.backups().is_empty());
    }

    #[test]
    fn test_install_malformed_config_fails() {
        let fixture = TestFixtureBuilder::new().unwrap().with_default_registry().unwrap().build();
        fixture.with_user_config("{ this is not json").unwrap();

        fixture
            .command()
            .args(["install", "serena"])
            .assert()
            .code(1)
            .stderr(
                predicate::str::contains("Malformed configuration")
                    .and(predicate::str::contains("Backup saved at")),
            );

        fixture.target_file().assert("{ this is not json");
    }
}
