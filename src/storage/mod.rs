// src/storage/mod.rs
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager rooted at the given output directory,
    /// creating it (and any missing parents) up front.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| StorageError::CreateDir {
                path: base_path.clone(),
                source: e,
            })?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves one extracted fragment under the output directory, mirroring the
    /// source path: converting `docs/page.html` writes `<base>/docs/page.html`.
    ///
    /// The destination is built with `PathBuf::join` semantics, so an absolute
    /// source path replaces the base directory entirely. That case and `..`
    /// components are flagged with a warning rather than rewritten.
    pub fn save_fragment(&self, source: &Path, fragment: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(source);

        if escapes_base(source) {
            tracing::warn!(
                "Destination {} falls outside the output directory",
                file_path.display()
            );
        }

        // Create intermediate directories mirroring the source layout
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        tracing::info!("Writing file: {}", file_path.display());
        write_atomic(&file_path, fragment)?;

        Ok(file_path)
    }
}

/// True when joining `source` onto a base directory can land outside it.
fn escapes_base(source: &Path) -> bool {
    source.is_absolute()
        || source
            .components()
            .any(|component| matches!(component, Component::ParentDir))
}

/// Writes through a temp file in the destination directory followed by a
/// rename, so an interrupted run never leaves a truncated destination file.
fn write_atomic(path: &Path, content: &str) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tmp.write_all(content.as_bytes()).map_err(|e| StorageError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tmp.persist(path).map_err(|e| StorageError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
