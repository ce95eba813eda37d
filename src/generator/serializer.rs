//! Rendering and writing the host document.

use crate::error::{GeneratorError, Result};
use crate::models::Document;
use std::fs;
use std::path::Path;
use tracing::info;

/// Renders `document` as two-space indented JSON.
pub fn render(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Overwrites `path` with the rendered document.
///
/// Uses temp file + rename so an interrupted run leaves the previous file intact.
/// A symlinked `path` is resolved first, so the link survives and its target
/// receives the new content.
pub fn write_document(document: &Document, path: &Path) -> Result<()> {
    let content = render(document)?;

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut temp_name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = target.with_file_name(temp_name);

    fs::write(&temp_path, &content).map_err(|e| GeneratorError::io(&temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, &target) {
        // Best effort; the rename error is the one worth reporting
        let _ = fs::remove_file(&temp_path);
        return Err(GeneratorError::io(&target, e));
    }

    info!(path = %path.display(), bytes = content.len(), "wrote configuration");
    Ok(())
}
