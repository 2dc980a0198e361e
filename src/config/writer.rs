use super::UserConfig;
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write the user configuration as pretty JSON.
///
/// The document is written to a temporary file next to `path` and then
/// renamed over it. A symlinked `path` is resolved first so the link target
/// is updated and the link survives; an existing file keeps its permissions.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to create parent directories
/// - Unable to serialize the configuration
/// - Unable to write or rename the temporary file
pub fn write_user_config<P: AsRef<Path>>(path: P, config: &UserConfig) -> std::io::Result<()> {
    let path_ref = path.as_ref();
    let target =
        if path_ref.exists() { fs::canonicalize(path_ref)? } else { path_ref.to_path_buf() };

    // Ensure parent directory exists
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut json = serde_json::to_string_pretty(config.document())?;
    json.push('\n');

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(json.as_bytes())?;
    temp.as_file().sync_all()?;
    if let Ok(existing) = fs::metadata(&target) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.persist(&target).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {}", json.len(), target.display());
    Ok(())
}

/// Create a backup of a file with timestamp
///
/// The copy is named `<file>.backup.<YYYYMMDD_HHMMSS>`. An existing backup is
/// never overwritten; a numeric suffix is appended instead.
///
/// # Errors
///
/// Returns an error if unable to copy the file
pub fn backup_file<P: AsRef<Path>>(path: P) -> std::io::Result<Option<PathBuf>> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Ok(None);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = unique_backup_path(path_ref, &timestamp);

    fs::copy(path_ref, &backup_path)?;
    info!("Created backup: {}", backup_path.display());

    Ok(Some(backup_path))
}

fn unique_backup_path(path: &Path, timestamp: &str) -> PathBuf {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or(".claude.json");
    let base = path.with_file_name(format!("{file_name}.backup.{timestamp}"));
    if !base.exists() {
        return base;
    }

    (1..)
        .map(|n| path.with_file_name(format!("{file_name}.backup.{timestamp}.{n}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(base)
}
