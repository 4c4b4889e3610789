//! JSON file implementation of [`PlanRepository`].

use std::path::PathBuf;

use async_trait::async_trait;
use nutrisync_core::error::{NutriError, Result};
use nutrisync_core::plan::SavedPlan;
use nutrisync_core::repository::PlanRepository;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::dto::{PLAN_RECORD_ENTITY, create_plan_record_migrator};
use crate::paths::NutriPaths;
use crate::storage::AtomicJsonFile;

/// Version assumed for bare plan objects written before records were versioned.
const LEGACY_VERSION: &str = "1.0.0";

/// Stores the session plan as one versioned JSON document.
///
/// File I/O runs on the blocking pool; callers simply await each call.
///
/// # Example
///
/// ```ignore
/// use nutrisync_infrastructure::JsonPlanRepository;
///
/// let repository = JsonPlanRepository::new(&NutriPaths::default())?;
/// repository.save(&saved_plan).await?;
/// let restored = repository.load().await?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonPlanRepository {
    file: AtomicJsonFile,
}

impl JsonPlanRepository {
    /// Creates a repository at the record path resolved by `paths`.
    pub fn new(paths: &NutriPaths) -> Result<Self> {
        Ok(Self::at(paths.plan_record_file()?))
    }

    /// Creates a repository backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    fn load_blocking(file: &AtomicJsonFile) -> Result<Option<SavedPlan>> {
        let Some(content) = file.read()? else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            NutriError::malformed_state(format!(
                "Invalid JSON in {}: {}",
                file.path().display(),
                e
            ))
        })?;

        let Some(object) = value.as_object() else {
            return Err(NutriError::malformed_state(format!(
                "Plan record in {} is not a JSON object",
                file.path().display()
            )));
        };

        let migrator = create_plan_record_migrator();
        let loaded = if is_versioned_record(object) {
            migrator.load_flat_from(PLAN_RECORD_ENTITY, value)
        } else {
            // Unversioned blobs are the raw service response; an error body
            // was never a plan.
            if object.contains_key("error") {
                return Err(NutriError::malformed_state(
                    "Legacy plan record holds a service error",
                ));
            }
            debug!("Loading unversioned plan record as {}", LEGACY_VERSION);
            migrator.load_from(
                PLAN_RECORD_ENTITY,
                json!({ "version": LEGACY_VERSION, "data": value }),
            )
        };

        let saved: SavedPlan = loaded
            .map_err(|e| NutriError::malformed_state(format!("Cannot migrate plan record: {}", e)))?;

        Ok(Some(saved))
    }

    fn save_blocking(file: &AtomicJsonFile, saved: &SavedPlan) -> Result<()> {
        let migrator = create_plan_record_migrator();
        let json = migrator.save_domain_flat(PLAN_RECORD_ENTITY, saved)?;
        file.write(&json)
    }
}

/// A versioned record nests the plan under `plan` next to a string `version`.
///
/// Anything else is a bare service response, even one carrying its own
/// `version` field.
fn is_versioned_record(object: &Map<String, Value>) -> bool {
    object.get("version").is_some_and(Value::is_string)
        && object.get("plan").is_some_and(Value::is_object)
}

#[async_trait]
impl PlanRepository for JsonPlanRepository {
    async fn load(&self) -> Result<Option<SavedPlan>> {
        let file = self.file.clone();
        let loaded = tokio::task::spawn_blocking(move || Self::load_blocking(&file))
            .await
            .map_err(|e| NutriError::internal(format!("Failed to join task: {}", e)))?;

        if let Err(e) = &loaded {
            warn!(path = %self.file.path().display(), error = %e, "Plan record unreadable");
        }
        loaded
    }

    async fn save(&self, plan: &SavedPlan) -> Result<()> {
        let file = self.file.clone();
        let saved = plan.clone();
        tokio::task::spawn_blocking(move || Self::save_blocking(&file, &saved))
            .await
            .map_err(|e| NutriError::internal(format!("Failed to join task: {}", e)))??;

        debug!(path = %self.file.path().display(), "Plan record saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| NutriError::internal(format!("Failed to join task: {}", e)))??;

        debug!(path = %self.file.path().display(), "Plan record removed");
        Ok(())
    }
}
