//! Plan repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::plan::SavedPlan;

/// Durable storage for the single session plan record.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Reads the saved plan.
    ///
    /// Returns `Ok(None)` when nothing is stored and
    /// [`NutriError::MalformedPersistedState`](crate::error::NutriError::MalformedPersistedState)
    /// when a record exists but cannot be read.
    async fn load(&self) -> Result<Option<SavedPlan>>;

    /// Replaces the saved plan.
    async fn save(&self, plan: &SavedPlan) -> Result<()>;

    /// Removes the saved plan. Removing an absent record is not an error.
    async fn clear(&self) -> Result<()>;
}
