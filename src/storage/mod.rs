//! Filesystem input and export operations.
//!
//! Input data (standings, country scores, extra bets) lives as JSONL files
//! under a data directory; computed standings can be exported there too.

use std::path::PathBuf;
use thiserror::Error;

mod jsonl;

pub use jsonl::{InputKind, JsonlReader, JsonlWriter};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding the three input files.
    pub fn inputs_dir(&self) -> PathBuf {
        self.data_dir.join("inputs")
    }

    /// Directory computed standings are exported to.
    pub fn derived_dir(&self) -> PathBuf {
        self.data_dir.join("derived")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
