// JSON report files — pretty-printed, timestamped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Write any serializable report as pretty-printed JSON, creating parent
/// directories as needed. Returns the path written for display.
pub fn write_json_report<T: Serialize>(value: &T, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let body = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path.to_path_buf())
}

/// Default report filename: `{prefix}_{YYYYMMDD_HHMMSS}.json` in the
/// current directory. Local time, so filenames line up with the clock on
/// the machine that ran the scan.
pub fn timestamped_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.json",
        prefix,
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
