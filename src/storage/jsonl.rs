//! JSONL (JSON Lines) storage.
//!
//! Each line is one JSON object: a match record, a timeline, or a per-game
//! analysis. Lines that fail to parse are skipped with a warning.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{ensure_parent, StorageError};
use crate::models::{MatchId, MatchRecord, TimelineRecord};

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

    fn write_lines(&self, file: File, entities: &[T]) -> Result<usize, StorageError> {
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        Ok(count)
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        ensure_parent(&self.path)?;

        let count = self.write_lines(File::create(&self.path)?, entities)?;

        info!("Wrote {} entities to {:?}", count, self.path);
        Ok(count)
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

    /// Read every parseable entity in the file.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", index + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// Read match records in file order.
pub fn read_matches(path: &Path) -> Result<Vec<MatchRecord>, StorageError> {
    JsonlReader::new(path.to_path_buf()).read_all()
}

/// Read timelines keyed by match id. A later line for the same match
/// replaces an earlier one.
pub fn read_timelines(path: &Path) -> Result<HashMap<MatchId, TimelineRecord>, StorageError> {
    let timelines: Vec<TimelineRecord> = JsonlReader::new(path.to_path_buf()).read_all()?;
    Ok(timelines
        .into_iter()
        .map(|t| (t.metadata.match_id.clone(), t))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{standard_match, timeline_with_gold};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::fs::{self, OpenOptions};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        value: i32,
    }

    fn row(id: &str, value: i32) -> Row {
        Row {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("rows.jsonl");

        let writer = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&[row("a", 1), row("b", 2)]).unwrap(), 2);

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), vec![row("a", 1), row("b", 2)]);
    }

    #[test]
    fn test_write_all_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.jsonl");
        let writer = JsonlWriter::new(path.clone());

        writer.write_all(&[row("a", 1), row("b", 2)]).unwrap();
        writer.write_all(&[row("c", 3)]).unwrap();

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), vec![row("c", 3)]);
    }

    #[test]
    fn test_read_all_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.jsonl");
        fs::write(
            &path,
            "{\"id\":\"a\",\"value\":1}\nnot json\n\n{\"id\":\"b\",\"value\":2}\n",
        )
        .unwrap();

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), vec![row("a", 1), row("b", 2)]);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<Row> = JsonlReader::new(temp_dir.path().join("nope.jsonl"));
        assert!(matches!(reader.read_all(), Err(StorageError::PathNotFound(_))));
    }

    #[test]
    fn test_read_where() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.jsonl");
        JsonlWriter::new(path.clone())
            .write_all(&[row("a", 1), row("b", 2), row("c", 3)])
            .unwrap();

        let reader: JsonlReader<Row> = JsonlReader::new(path);
        let odd = reader.read_where(|r| r.value % 2 == 1).unwrap();
        assert_eq!(odd, vec![row("a", 1), row("c", 3)]);
    }

    #[test]
    fn test_match_and_timeline_files() {
        let temp_dir = TempDir::new().unwrap();
        let matches_path = temp_dir.path().join("matches.jsonl");
        let timelines_path = temp_dir.path().join("timelines.jsonl");

        JsonlWriter::new(matches_path.clone())
            .write_all(&[standard_match("NA1_1", true), standard_match("NA1_2", false)])
            .unwrap();
        JsonlWriter::new(timelines_path.clone())
            .write_all(&[timeline_with_gold("NA1_2", 3, |_| (0, 0))])
            .unwrap();
        // a truncated timeline line is dropped, leaving that match without one
        let mut file = OpenOptions::new().append(true).open(&timelines_path).unwrap();
        writeln!(file, "{{\"metadata\":{{\"matchId\":\"NA1_1\"}},\"info\":").unwrap();

        let matches = read_matches(&matches_path).unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["NA1_1", "NA1_2"]);

        let timelines = read_timelines(&timelines_path).unwrap();
        assert_eq!(timelines.len(), 1);
        assert!(timelines.contains_key(&MatchId::from("NA1_2")));
        assert_eq!(timelines[&MatchId::from("NA1_2")].frames().len(), 4);
    }
}
