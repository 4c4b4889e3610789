//! Atomic JSON file operations.
//!
//! Writes go to a temporary sibling file that is synced and then renamed over
//! the target, so a crash never leaves a half-written record behind.

use std::fs::{self, File};
use std::io::{ErrorKind, Write as IoWrite};
use std::path::{Path, PathBuf};

use nutrisync_core::error::{NutriError, Result};

/// A handle to a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct AtomicJsonFile {
    path: PathBuf,
}

impl AtomicJsonFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document text.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))`: the file exists and is not blank
    /// - `Ok(None)`: the file is missing or blank
    /// - `Err`: the file exists but could not be read
    pub fn read(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    /// Replaces the document atomically.
    pub fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Deletes the document. A missing file counts as deleted.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| NutriError::io(format!("Path has no file name: {}", self.path.display())))?;

        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }
}
