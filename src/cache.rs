// File: src/cache.rs
use crate::error::CacheError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

#[derive(Serialize)]
struct CacheEntryRef<'a, T> {
    expiry: DateTime<Utc>,
    data: &'a T,
}

#[derive(Deserialize)]
struct CacheEntry<T> {
    expiry: DateTime<Utc>,
    data: T,
}

/// File-per-key store for values that can be recomputed.
///
/// Every file holds `{"expiry": ..., "data": ...}`; reads past the expiry
/// fail with [`CacheError::Expired`].
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Stores `data` under `key` for `ttl`.
    pub fn set<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) -> Result<(), CacheError> {
        let expiry = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        fs::create_dir_all(&self.dir)?;
        let temp_file = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer(&mut writer, &CacheEntryRef { expiry, data })?;
            writer.flush()?;
        }
        temp_file
            .persist(self.path_for(key))
            .map_err(|e| CacheError::Io(e.error))?;
        Ok(())
    }

    /// Reads the value stored under `key` together with its expiry time.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<(T, DateTime<Utc>), CacheError> {
        let bytes = match fs::read(self.path_for(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(CacheError::DoesNotExist),
            Err(_) => return Err(CacheError::Corrupted),
        };
        let entry: CacheEntry<T> = serde_json::from_slice(&bytes).map_err(|_| CacheError::Corrupted)?;
        if Utc::now() > entry.expiry {
            return Err(CacheError::Expired {
                expiry: entry.expiry,
            });
        }
        Ok((entry.data, entry.expiry))
    }

    /// Removes the file for `key`. Missing entries are not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for(key))
    }
}

/// Hex-encodes a key so any string maps to a distinct, safe file name.
fn file_name_for(key: &str) -> String {
    let mut name = String::with_capacity(key.len() * 2 + 5);
    for byte in key.bytes() {
        name.push_str(&format!("{byte:02x}"));
    }
    name.push_str(".json");
    name
}
