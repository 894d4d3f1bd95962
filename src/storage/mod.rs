//! Filesystem adapters.
//!
//! Match and timeline records arrive as JSON Lines files; reports leave as
//! pretty-printed JSON. The analysis engine itself never touches the disk.

pub mod jsonl;

pub use jsonl::{read_matches, read_timelines, JsonlReader, JsonlWriter};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::Analysis;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write an analysis as pretty JSON, replacing any existing file.
pub fn write_report(path: &Path, analysis: &Analysis) -> Result<(), StorageError> {
    ensure_parent(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, analysis)?;
    writeln!(writer)?;
    writer.flush()?;

    info!("Wrote report to {:?}", path);
    Ok(())
}
