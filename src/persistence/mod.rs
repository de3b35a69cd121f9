//! JSON save/load with backup rotation
//!
//! Writes go to a `.tmp` sibling first; the previous file is rotated to
//! `.bak` and the temp file renamed into place, so a crash mid-write never
//! leaves a truncated save behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PersistError {
    /// True when the file simply doesn't exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize to pretty JSON and atomically replace `path`
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value)?;

    let tmp = sibling(path, "tmp");
    fs::write(&tmp, json)?;

    if path.exists() {
        let backup = sibling(path, "bak");
        if backup.exists() {
            fs::remove_file(&backup)?;
        }
        fs::rename(path, backup)?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load `path`, falling back to its `.bak` rotation if the primary is unreadable
pub fn load_json_with_backup<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    match load_json(path) {
        Ok(value) => Ok(value),
        Err(primary) => {
            let backup = sibling(path, "bak");
            if !backup.exists() {
                return Err(primary);
            }
            log::warn!("{} unreadable ({}), trying backup", path.display(), primary);
            load_json(&backup)
        }
    }
}

/// `scores.json` -> `scores.json.tmp`
fn sibling(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
