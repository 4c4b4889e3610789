//! Domain layer for NutriSync.
//!
//! Holds the input model, the plan and session types, the pure analytics
//! derived from them, and the traits implemented by the infrastructure and
//! interaction crates.

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod plan;
pub mod repository;
pub mod session;

// Re-export common error type
pub use error::NutriError;

pub use analytics::{PredictionPoint, WeightPrediction, compute_insight, compute_weight_prediction};
pub use api::NutritionApi;
pub use config::ClientConfig;
pub use form::{FormField, FormInput, PlanProfile, PlanRequest};
pub use plan::{PlanResult, SavedPlan};
pub use repository::PlanRepository;
pub use session::{ChatEntry, HydrationLevel, ProgressPoint, ProgressSeries, Session, SessionState};
