use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::error::{AppError, Result};

/// List the regular files directly under `root`.
///
/// A root that exists but is not a directory is logged as an error and
/// yields no files. A root that cannot be inspected at all is an error.
/// Order follows the directory listing and is not sorted.
pub async fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    let metadata = tokio::fs::metadata(root).await.map_err(|e| {
        AppError::FileRead(format!("Failed to inspect {}: {}", root.display(), e))
    })?;

    if let Err(err) = ensure_directory(root, &metadata) {
        error!(error = %err, path = %root.display(), "Target path is not a directory.");
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(root).await.map_err(|e| {
        AppError::FileRead(format!("Failed to list {}: {}", root.display(), e))
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        // file_type() does not follow symlinks
        let file_type = entry.file_type().await?;
        if file_type.is_file() {
            files.push(entry.path());
        } else {
            debug!(path = %entry.path().display(), "Skipping non-file entry");
        }
    }

    Ok(files)
}

fn ensure_directory(root: &Path, metadata: &std::fs::Metadata) -> Result<()> {
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(AppError::InvalidRootPath(format!(
            "{} is not a directory",
            root.display()
        )))
    }
}

/// Table name for a file: its base name with the last extension removed
pub fn table_name_for(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::FileRead(format!("Cannot derive a table name from {}", path.display()))
        })
}
