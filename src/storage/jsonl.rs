//! JSONL (JSON Lines) files.
//!
//! Each line is a valid JSON object representing one entity. Input files are
//! the source of truth for one aggregation run.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// Input file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Standing,
    CountryScore,
    ExtraBet,
}

impl InputKind {
    /// Get the filename for this input kind.
    pub fn filename(&self) -> &'static str {
        match self {
            InputKind::Standing => "standings.jsonl",
            InputKind::CountryScore => "country_scores.jsonl",
            InputKind::ExtraBet => "extra_bets.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for one of the input files.
    pub fn for_input(config: &StorageConfig, kind: InputKind) -> Self {
        Self::new(config.inputs_dir().join(kind.filename()))
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single row to the file.
    pub fn append(&self, row: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", serde_json::to_string(row)?)?;
        writer.flush()?;

        debug!("Appended row to {:?}", self.path);
        Ok(())
    }

    /// Write rows, replacing the entire file.
    pub fn write_all(&self, rows: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        for row in rows {
            writeln!(writer, "{}", serde_json::to_string(row)?)?;
        }

        writer.flush()?;
        debug!("Wrote {} rows to {:?}", rows.len(), self.path);

        Ok(rows.len())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for one of the input files.
    pub fn for_input(config: &StorageConfig, kind: InputKind) -> Self {
        Self::new(config.inputs_dir().join(kind.filename()))
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all rows from the file.
    ///
    /// A missing file is an empty input; unparseable lines are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut rows = Vec::new();

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    warn!("Skipping line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtraBet;
    use tempfile::TempDir;

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bets.jsonl");

        let bets = vec![ExtraBet::new("alice", 2), ExtraBet::new("bob", 4)];

        let writer: JsonlWriter<ExtraBet> = JsonlWriter::new(path.clone());
        let count = writer.write_all(&bets).unwrap();
        assert_eq!(count, 2);

        let reader: JsonlReader<ExtraBet> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), bets);
    }

    #[test]
    fn test_jsonl_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("append.jsonl");

        let writer: JsonlWriter<ExtraBet> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<ExtraBet> = JsonlReader::new(path);

        writer.append(&ExtraBet::new("alice", 2)).unwrap();
        writer.append(&ExtraBet::new("bob", 4)).unwrap();

        let bets = reader.read_all().unwrap();
        assert_eq!(bets.len(), 2);
        assert_eq!(bets[1], ExtraBet::new("bob", 4));
    }

    #[test]
    fn test_jsonl_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.jsonl");

        let reader: JsonlReader<ExtraBet> = JsonlReader::new(path);

        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_all_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overwrite.jsonl");

        let writer: JsonlWriter<ExtraBet> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<ExtraBet> = JsonlReader::new(path);

        writer.write_all(&[ExtraBet::new("old", 1)]).unwrap();
        writer
            .write_all(&[ExtraBet::new("new1", 2), ExtraBet::new("new2", 3)])
            .unwrap();

        let bets = reader.read_all().unwrap();
        assert_eq!(bets.len(), 2);
        assert_eq!(bets[0].username, "new1");
    }

    #[test]
    fn test_read_all_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad_lines.jsonl");

        std::fs::write(
            &path,
            r#"{"username":"alice","points":2}
not-valid-json
{"username":"bob","points":4}
"#,
        )
        .unwrap();

        let reader: JsonlReader<ExtraBet> = JsonlReader::new(path);
        let bets = reader.read_all().unwrap();

        assert_eq!(bets.len(), 2);
        assert_eq!(bets[0].username, "alice");
        assert_eq!(bets[1].username, "bob");
    }

    #[test]
    fn test_read_all_skips_empty_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty_lines.jsonl");

        std::fs::write(
            &path,
            r#"{"username":"alice","points":2}

{"username":"bob","points":4}
"#,
        )
        .unwrap();

        let reader: JsonlReader<ExtraBet> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_input_kind_filenames() {
        assert_eq!(InputKind::Standing.filename(), "standings.jsonl");
        assert_eq!(InputKind::CountryScore.filename(), "country_scores.jsonl");
        assert_eq!(InputKind::ExtraBet.filename(), "extra_bets.jsonl");
    }

    #[test]
    fn test_for_input_path() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let writer: JsonlWriter<ExtraBet> = JsonlWriter::for_input(&config, InputKind::Standing);

        assert_eq!(writer.path, config.inputs_dir().join("standings.jsonl"));
    }

    #[test]
    fn test_reader_exists() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("present.jsonl");
        std::fs::write(&present, "").unwrap();

        let reader: JsonlReader<ExtraBet> = JsonlReader::new(present);
        assert!(reader.exists());

        let absent: JsonlReader<ExtraBet> = JsonlReader::new(temp_dir.path().join("absent.jsonl"));
        assert!(!absent.exists());
    }
}
