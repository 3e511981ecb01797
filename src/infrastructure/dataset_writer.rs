//! Dataset JSON output

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{CountryEntry, PipelineError, PipelineResult};

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the entries as pretty-printed JSON (2-space indent, UTF-8 unescaped)
///
/// The file is replaced atomically: readers see either the previous dataset or
/// the new one, never a truncated file.
pub async fn write_dataset(path: &Path, entries: &[CountryEntry]) -> PipelineResult<()> {
    let mut json = serde_json::to_string_pretty(entries)?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PipelineError::io(parent, e))?;
    }

    let temp = temp_sibling(path);
    tokio::fs::write(&temp, json.as_bytes())
        .await
        .map_err(|e| PipelineError::io(&temp, e))?;
    tokio::fs::rename(&temp, path)
        .await
        .map_err(|e| PipelineError::io(path, e))?;

    info!("💾 Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}
