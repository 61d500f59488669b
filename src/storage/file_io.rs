//! JSON persistence helpers
//!
//! Every repository file goes through these two functions. Writes land in a
//! sibling `.json.tmp` file first and replace the target with a rename, so a
//! crash mid-write leaves the previous contents in place.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TrackerError, TrackerResult};

fn storage_error(action: &str, path: &Path, cause: impl Display) -> TrackerError {
    TrackerError::Storage(format!("Failed to {} {}: {}", action, path.display(), cause))
}

/// Sibling path used while a write is in flight
fn staging_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

/// Load a JSON document, or `T::default()` when nothing has been saved yet
pub fn read_json<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> TrackerResult<T> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Serialize `data` as pretty JSON and swap it into place
pub fn write_json_atomic<T: Serialize>(path: impl AsRef<Path>, data: &T) -> TrackerResult<()> {
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let staging = staging_path(path);
    let written = File::create(&staging)
        .map_err(|e| storage_error("create", &staging, e))
        .and_then(|file| {
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, data)
                .map_err(|e| storage_error("serialize", path, e))?;
            let file = out
                .into_inner()
                .map_err(|e| storage_error("flush", &staging, e.error()))?;
            file.sync_all().map_err(|e| storage_error("sync", &staging, e))
        })
        .and_then(|()| fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e)));

    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Sample = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Sample::default());
    }

    #[test]
    fn test_write_then_read_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("sample.json");

        let data = Sample {
            name: "lunch".to_string(),
            value: 42,
        };
        write_json_atomic(&path, &data).unwrap();

        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, data);
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_read_invalid_json_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let result: Result<Sample, _> = read_json(&path);
        let err = result.unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_failed_replace_keeps_old_file_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        // A directory at the target path makes the final rename fail
        let path = temp_dir.path().join("taken.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let result = write_json_atomic(&path, &Sample::default());
        assert!(matches!(result, Err(TrackerError::Storage(_))));
        assert!(path.join("keep").exists());
        assert!(!staging_path(&path).exists());
    }
}
