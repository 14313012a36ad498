use std::path::{Path, PathBuf};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::error::{Result, TranslocalError};

/// Read a file and parse it as a JSON document
pub async fn read_json_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| TranslocalError::Read(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| TranslocalError::Read(format!("{}: {}", path.display(), e)))
}

/// Write a JSON document as pretty-printed UTF-8, creating parent directories
pub async fn write_json_file<P: AsRef<Path>>(path: P, data: &Value) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| TranslocalError::Write(format!("{}: {}", path.display(), e)))?;
    }

    let content = serde_json::to_string_pretty(data)
        .map_err(|e| TranslocalError::Write(format!("{}: {}", path.display(), e)))?;

    fs::write(path, content)
        .await
        .map_err(|e| TranslocalError::Write(format!("{}: {}", path.display(), e)))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Expand a resolved path template against the filesystem.
///
/// Returns existing files matching the glob pattern, sorted so runs are
/// deterministic. A pattern that matches nothing yields an empty list, which
/// the orchestrator reports as a warning rather than an error.
pub fn expand_template(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();

    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) if path.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => debug!("Skipping unreadable glob entry: {}", e),
        }
    }

    matches.sort();
    Ok(matches)
}
