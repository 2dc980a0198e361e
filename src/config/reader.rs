use super::{UserConfig, MCP_SERVERS_KEY};
use crate::InstallerError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read the user configuration file.
///
/// A missing file yields an empty document.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to read the file (when it exists)
/// - The content is not a JSON object
/// - `mcpServers` is present but is not an object
pub fn read_user_config<P: AsRef<Path>>(path: P) -> Result<UserConfig, InstallerError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Ok(UserConfig::default());
    }

    let content = fs::read_to_string(path_ref)?;
    let malformed = |reason: String| InstallerError::MalformedUserConfig {
        path: path_ref.to_path_buf(),
        reason,
        backup: None,
    };

    let value: Value = serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(document) = value else {
        return Err(malformed("top-level value is not a JSON object".to_string()));
    };

    if document.get(MCP_SERVERS_KEY).is_some_and(|servers| !servers.is_object()) {
        return Err(malformed(format!("`{MCP_SERVERS_KEY}` is not a JSON object")));
    }

    Ok(UserConfig::from_document(document))
}
