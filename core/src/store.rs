//! # Cracked Results Store
//!
//! A JSON array of result objects on disk. Only keys containing `file` are
//! inspected to decide whether an artifact was already cracked; everything
//! else is opaque.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use airlock_common::handshake::CrackResult;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{path} is not valid JSON: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("{0} does not contain a JSON array")]
    NotAnArray(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw entries. A missing file or a `null` document is an empty store.
    pub fn entries(&self) -> Result<Vec<Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        match document {
            Value::Null => Ok(Vec::new()),
            Value::Array(entries) => Ok(entries),
            _ => Err(StoreError::NotAnArray(self.path.clone())),
        }
    }

    /// Basenames of every artifact that already has a stored result.
    pub fn cracked_files(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.entries()?.iter().flat_map(file_values).collect())
    }

    pub fn results(&self) -> Result<Vec<CrackResult>, StoreError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect())
    }

    /// Stores `result`, replacing any entry recorded for the same artifact.
    pub fn save(&self, result: &CrackResult) -> Result<(), StoreError> {
        let file_name = result.file_name();
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|entry| !file_values(entry).contains(&file_name));
        if entries.len() != before {
            debug!("replacing stored result for {file_name}");
        }
        let entry = serde_json::to_value(result).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        entries.push(entry);

        let text = serde_json::to_string_pretty(&Value::Array(entries)).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Basenames found under the `*file*` keys of one entry.
fn file_values(entry: &Value) -> Vec<String> {
    let Some(obj) = entry.as_object() else {
        return Vec::new();
    };

    obj.iter()
        .filter(|(key, _)| key.contains("file"))
        .filter_map(|(_, value)| value.as_str())
        .filter_map(|path| Path::new(path).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}
