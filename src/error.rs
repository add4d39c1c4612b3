// File: src/error.rs
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = DictError> = std::result::Result<T, E>;

/// Errors raised by the plugin host around the resolver.
///
/// The resolver itself never fails; these cover files, the word index and the
/// processes spawned by actions.
#[derive(Debug, Error)]
pub enum DictError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("word index encoding failed: {0}")]
    Index(#[from] bincode::Error),

    #[error("word list line {line}: {reason}")]
    WordList { line: usize, reason: String },

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl DictError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DictError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Outcome of a cache read that produced no usable value.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("the cache does not exist")]
    DoesNotExist,

    #[error("the cache is corrupted")]
    Corrupted,

    #[error("the cache expired at {expiry}")]
    Expired { expiry: DateTime<Utc> },

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
