use crate::fixtures::TestFixtureBuilder;
use predicates::prelude::*;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_existing_server() {
        let fixture = TestFixtureBuilder::new()
            .unwrap()
            .with_default_registry()
            .unwrap()
            .with_existing_user_config()
            .unwrap()
            .build();

        fixture.command().args(["remove", "serena"]).assert().success().stdout(
            predicate::str::contains("✓ Removed: serena")
                .and(predicate::str::contains("Successfully removed 1 MCP server(s)")),
        );

        let config = fixture.user_config_json();
        assert_eq!(config["mcpServers"], json!({}));
        assert_eq!(config["theme"], "dark");
        assert_eq!(fixture.backups().len(), 1);
    }

    #[test]
    fn test_remove_missing_server_exits_nonzero_without_write() {
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
            .args(["remove", "ghost"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("ghost not found in configuration"));

        assert_eq!(fixture.read_user_config().unwrap(), before);
    }

    #[test]
    fn test_remove_without_section_succeeds() {
        let fixture = TestFixtureBuilder::new().unwrap().with_default_registry().unwrap().build();
        fixture.with_user_config(r#"{"theme": "light"}"#).unwrap();

        fixture
            .command()
            .args(["remove", "serena"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No MCP servers configured"));

        assert!(fixture.backups().is_empty());
    }

    #[test]
    fn test_remove_requires_a_name() {
        let fixture = TestFixtureBuilder::new().unwrap().with_default_registry().unwrap().build();
        fixture.command().arg("remove").assert().failure();
    }
}
