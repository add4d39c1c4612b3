// File: src/config.rs
use crate::error::{DictError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_WORD_LIST: &str = "words.tsv";

/// Persistent settings of the action, stored as `config.json` in the support
/// directory. Keys this version does not know about are kept on write-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Script name stamped as `action` on every item.
    pub action_default_script: String,
    pub limit: usize,
    pub debug: bool,
    /// Launcher window width in pixels, used to truncate subtitles.
    pub window_width: f64,
    /// Lifetime of cached lookups; 0 disables the cache.
    pub cache_ttl_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_list: Option<PathBuf>,
    pub max_edit_distance: usize,
    pub max_suggestions: usize,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            action_default_script: "dict".to_string(),
            limit: 10,
            debug: false,
            window_width: 300.0,
            cache_ttl_secs: 3600,
            word_list: None,
            max_edit_distance: 2,
            max_suggestions: 8,
            extra: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Reads `config.json` from `dir`, filling in defaults for absent keys.
    /// A missing file gives the defaults; an unreadable one is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| DictError::Json { path, source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(DictError::io(path, e)),
        }
    }

    /// Like [`Config::load`], but an unreadable file gives the defaults along
    /// with the error, so the caller can report it and leave the file alone.
    pub fn load_or_default(dir: &Path) -> (Self, Option<DictError>) {
        match Self::load(dir) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Writes the config, defaults included, to `config.json` in `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| DictError::io(dir, e))?;
        let path = dir.join(CONFIG_FILE);

        let temp_file = NamedTempFile::new_in(dir).map_err(|e| DictError::io(dir, e))?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, self).map_err(|source| DictError::Json {
                path: path.clone(),
                source,
            })?;
            writer.flush().map_err(|e| DictError::io(&path, e))?;
        }
        temp_file
            .persist(&path)
            .map_err(|e| DictError::io(&path, e.error))?;
        Ok(())
    }

    /// Word list location; relative paths are taken from the support dir.
    pub fn word_list_path(&self, support_dir: &Path) -> PathBuf {
        match &self.word_list {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => support_dir.join(path),
            None => support_dir.join(DEFAULT_WORD_LIST),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
