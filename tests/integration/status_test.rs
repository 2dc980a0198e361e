use crate::fixtures::TestFixtureBuilder;
use predicates::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_differences() {
        let fixture = TestFixtureBuilder::new().unwrap().with_default_registry().unwrap().build();
        fixture
            .with_user_config(r#"{"mcpServers": {"serena": {}, "legacy-tool": {"command": "x"}}}"#)
            .unwrap();

        fixture.command().arg("status").assert().success().stdout(
            predicate::str::contains("Configured servers: 2")
                .and(predicate::str::contains("Available servers: 2"))
                .and(predicate::str::contains("✓ serena"))
                .and(predicate::str::contains("⚠️  (unknown) legacy-tool"))
                .and(predicate::str::contains("Available but not installed:"))
                .and(predicate::str::contains("• notion")),
        );
    }

    #[test]
    fn test_status_without_config() {
        let fixture = TestFixtureBuilder::new().unwrap().with_default_registry().unwrap().build();

        fixture.command().arg("status").assert().success().stdout(
            predicate::str::contains("Configured servers: 0")
                .and(predicate::str::contains("Installed Servers").not()),
        );
    }

    #[test]
    fn test_status_counts_backups() {
        let fixture = TestFixtureBuilder::new()
            .unwrap()
            .with_default_registry()
            .unwrap()
            .with_existing_user_config()
            .unwrap()
            .build();

        fixture.command().args(["install", "notion"]).assert().success();

        fixture
            .command()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Backups: 1"));
    }
}
