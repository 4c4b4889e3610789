//! Remote plan service boundary.

use async_trait::async_trait;

use crate::error::Result;
use crate::form::PlanRequest;
use crate::plan::PlanResult;

/// The four operations offered by the plan service.
///
/// Each call is exactly one request/response exchange: implementations do
/// not retry and never touch session state. Results go back to the caller,
/// which decides whether to commit them.
#[async_trait]
pub trait NutritionApi: Send + Sync {
    /// Requests a plan for the submitted form.
    ///
    /// A body carrying an `error` field is reported as
    /// [`NutriError::Validation`](crate::error::NutriError::Validation).
    async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanResult>;

    /// Sends raw image bytes for food analysis and returns the analysis text.
    async fn analyze_food_image(&self, image: &[u8]) -> Result<String>;

    /// Sends one chat message and returns the reply.
    async fn send_chat_message(&self, message: &str) -> Result<String>;

    /// Records a weight and returns the authoritative weight history.
    async fn track_progress(&self, weight: f64) -> Result<Vec<f64>>;
}
