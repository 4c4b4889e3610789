//! Plan record DTOs and migrations
//!
//! The session plan is stored as a single flat JSON object carrying a
//! `version` key next to a nested `plan` object. Records written before
//! versioning existed are bare plan objects; the repository loads them as
//! `1.0.0` data without touching their own keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use version_migrate::{IntoDomain, Versioned};

use nutrisync_core::form::{FormInput, PlanProfile};
use nutrisync_core::plan::{PlanResult, SavedPlan};

/// Entity name under which the plan record migration path is registered.
pub const PLAN_RECORD_ENTITY: &str = "plan_record";

/// Plan record V1.0.0 (legacy, unversioned blob).
///
/// This is exactly the object the plan service returned, stored as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct PlanRecordV1_0 {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Plan payload nested inside V1.1 records.
///
/// Kept as the raw service object; keys are interpreted only when the
/// payload is converted into a [`PlanResult`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanPayloadDTO(pub Map<String, Value>);

/// Form snapshot nested inside V1.1 records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshotDTO {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub selection: String,
    /// `goal` or `activity`.
    #[serde(default)]
    pub profile: String,
}

/// Plan record V1.1.0.
///
/// Nests the plan, and adds the form snapshot and save timestamp so a
/// rehydrated dashboard shows the prediction for the submitted weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct PlanRecordV1_1 {
    pub plan: PlanPayloadDTO,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormSnapshotDTO>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from PlanRecordV1_0 to PlanRecordV1_1.
/// Nests the bare plan; a legacy record has no form snapshot or timestamp.
impl version_migrate::MigratesTo<PlanRecordV1_1> for PlanRecordV1_0 {
    fn migrate(self) -> PlanRecordV1_1 {
        PlanRecordV1_1 {
            plan: PlanPayloadDTO(self.fields),
            form: None,
            saved_at: None,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<PlanPayloadDTO> for PlanResult {
    fn from(dto: PlanPayloadDTO) -> Self {
        PlanResult::from(dto.0)
    }
}

impl From<PlanResult> for PlanPayloadDTO {
    fn from(plan: PlanResult) -> Self {
        PlanPayloadDTO(plan.into())
    }
}

impl From<FormSnapshotDTO> for FormInput {
    fn from(dto: FormSnapshotDTO) -> Self {
        let profile = dto.profile.parse::<PlanProfile>().unwrap_or_default();
        let selection = if dto.selection.is_empty() {
            profile.default_selection().to_string()
        } else {
            dto.selection
        };

        FormInput {
            age: dto.age,
            weight: dto.weight,
            height: dto.height,
            selection,
            profile,
        }
    }
}

impl From<FormInput> for FormSnapshotDTO {
    fn from(form: FormInput) -> Self {
        FormSnapshotDTO {
            age: form.age,
            weight: form.weight,
            height: form.height,
            selection: form.selection,
            profile: form.profile.to_string(),
        }
    }
}

/// Convert PlanRecordV1_1 DTO to domain model.
impl IntoDomain<SavedPlan> for PlanRecordV1_1 {
    fn into_domain(self) -> SavedPlan {
        SavedPlan {
            plan: self.plan.into(),
            form: self.form.map(Into::into),
            saved_at: self.saved_at,
        }
    }
}

/// Convert domain model to PlanRecordV1_1 DTO for persistence.
impl version_migrate::FromDomain<SavedPlan> for PlanRecordV1_1 {
    fn from_domain(saved: SavedPlan) -> Self {
        PlanRecordV1_1 {
            plan: saved.plan.into(),
            form: saved.form.map(Into::into),
            saved_at: saved.saved_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for plan records.
///
/// # Migration Path
///
/// - V1.0 → V1.1: Nests the bare plan under `plan`, no form snapshot
/// - V1.1 → SavedPlan: Converts DTO to domain model
///
/// # Example
///
/// ```ignore
/// let migrator = create_plan_record_migrator();
/// let saved: SavedPlan = migrator.load_flat_from(PLAN_RECORD_ENTITY, json_value)?;
/// ```
pub fn create_plan_record_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let plan_record_path = version_migrate::Migrator::define(PLAN_RECORD_ENTITY)
        .from::<PlanRecordV1_0>()
        .step::<PlanRecordV1_1>()
        .into_with_save::<SavedPlan>();

    migrator
        .register(plan_record_path)
        .expect("Failed to register plan_record migration path");

    migrator
}
