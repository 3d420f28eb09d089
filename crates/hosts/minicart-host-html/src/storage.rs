//! File-backed [`Persistence`]: one JSON object mapping keys to raw string
//! values, the on-disk equivalent of a browser profile's local storage.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use minicart_core::error::CoreError;
use minicart_core::system::Persistence;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/minicart/local-storage.json`, if the platform has a data
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("minicart").join("local-storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text).map_err(|e| CoreError::Parse {
            file: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(entries).map_err(CoreError::Encode)?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), keys = entries.len(), "wrote storage file");
        Ok(())
    }
}

impl Persistence for FilePersistence {
    fn save(&mut self, key: &str, data: &str) -> Result<(), CoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), data.to_string());
        self.write_entries(&entries)
    }

    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
