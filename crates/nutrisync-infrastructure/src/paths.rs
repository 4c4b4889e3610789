//! Path management for NutriSync's durable files.
//!
//! Paths are resolved via AppPaths from the version-migrate crate, so the
//! data directory follows platform conventions (XDG on Linux).

use std::path::PathBuf;

use nutrisync_core::error::{NutriError, Result};
use version_migrate::AppPaths;

/// File name of the session plan record.
pub const PLAN_RECORD_FILE: &str = "nutri_data.json";

/// Path resolution for NutriSync.
///
/// # Directory Structure
///
/// ```text
/// ~/.local/share/nutrisync/    # Data directory (AppPaths default)
/// └── nutri_data.json          # Versioned session plan record
/// ```
#[derive(Debug, Clone, Default)]
pub struct NutriPaths {
    data_dir_override: Option<PathBuf>,
}

impl NutriPaths {
    /// Creates a resolver, optionally pinned to an explicit data directory.
    pub fn new(data_dir_override: Option<PathBuf>) -> Self {
        Self { data_dir_override }
    }

    fn app_paths() -> AppPaths {
        AppPaths::new("nutrisync")
    }

    /// Returns the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`NutriError::Config`] when no home directory can be determined.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        Self::app_paths()
            .data_dir()
            .map_err(|_| NutriError::config("Cannot find home directory for data storage"))
    }

    /// Returns the path of the session plan record.
    pub fn plan_record_file(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(PLAN_RECORD_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used_verbatim() {
        let paths = NutriPaths::new(Some(PathBuf::from("/tmp/nutrisync-test")));
        assert_eq!(paths.data_dir().unwrap(), PathBuf::from("/tmp/nutrisync-test"));
        assert_eq!(
            paths.plan_record_file().unwrap(),
            PathBuf::from("/tmp/nutrisync-test/nutri_data.json")
        );
    }

    #[test]
    fn test_record_file_name() {
        let path = NutriPaths::new(Some(PathBuf::from("/data")))
            .plan_record_file()
            .unwrap();
        assert!(path.ends_with(PLAN_RECORD_FILE));
    }
}
