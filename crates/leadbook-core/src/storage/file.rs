//! # File-backed Slots
//!
//! Each slot is a `<key>.json` file inside one directory. Writes go to a
//! sibling temp file, which is synced to disk and then renamed into place,
//! so a crash mid-write leaves the previous value readable.
//!
//! The file size is checked against `MAX_SNAPSHOT_SIZE` BEFORE reading.

use super::{SlotStorage, validate_key};
use crate::LeadError;
use crate::primitives::MAX_SNAPSHOT_SIZE;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    /// Slots stored under `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, LeadError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SlotStorage for FileSlots {
    fn read(&self, key: &str) -> Result<Option<String>, LeadError> {
        let path = self.slot_path(key)?;
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LeadError::IoError(format!(
                    "Stat slot '{}': {}",
                    path.display(),
                    e
                )));
            }
        };
        if metadata.len() > MAX_SNAPSHOT_SIZE as u64 {
            return Err(LeadError::StorageError(format!(
                "Slot file {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_SNAPSHOT_SIZE
            )));
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LeadError::IoError(format!(
                "Read slot '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LeadError> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            LeadError::IoError(format!("Create directory '{}': {}", self.dir.display(), e))
        })?;

        let tmp = path.with_extension("json.tmp");
        let write_err = |e: std::io::Error| {
            LeadError::IoError(format!("Write slot '{}': {}", tmp.display(), e))
        };
        let mut file = std::fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        std::fs::rename(&tmp, &path)
            .map_err(|e| LeadError::IoError(format!("Replace slot '{}': {}", path.display(), e)))?;
        Ok(())
    }
}
