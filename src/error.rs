use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a persisted snapshot could not be used. Always recovered by falling
/// back to defaults.
#[derive(Debug, Error)]
pub enum PersistenceReadError {
    #[error("no persisted state")]
    Absent,
    #[error("persisted state unreadable: {0}")]
    Unreadable(#[from] StorageError),
    #[error("persisted state is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("persisted state is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("backup is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("backup must be a JSON object")]
    NotAnObject,
    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("could not read backup {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
}
