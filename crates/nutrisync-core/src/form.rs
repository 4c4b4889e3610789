//! Input model: the raw form fields and their coercion into a plan request.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::NutriError;

/// Default selection for the goal profile.
pub const DEFAULT_GOAL: &str = "fat_loss";
/// Default selection for the activity profile.
pub const DEFAULT_ACTIVITY: &str = "moderate";

/// Which key the selection is sent under when requesting a plan.
///
/// The plan service accepts either a fitness goal or an activity level
/// alongside the biometric fields; a deployment uses one or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlanProfile {
    #[default]
    Goal,
    Activity,
}

impl PlanProfile {
    /// The selection a fresh form starts with under this profile.
    pub fn default_selection(self) -> &'static str {
        match self {
            PlanProfile::Goal => DEFAULT_GOAL,
            PlanProfile::Activity => DEFAULT_ACTIVITY,
        }
    }
}

/// A named field of [`FormInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FormField {
    Age,
    Weight,
    Height,
    /// The goal or activity selector, depending on the profile.
    #[strum(serialize = "goal", serialize = "activity", serialize = "selection")]
    Selection,
}

impl FormField {
    /// Parses a field name, reporting unknown names as [`NutriError::UnknownField`].
    pub fn parse(name: &str) -> Result<Self, NutriError> {
        FormField::from_str(name.trim()).map_err(|_| NutriError::UnknownField(name.to_string()))
    }
}

/// The user-entered form, held as raw text.
///
/// Nothing is validated here: numeric fields are coerced only when a
/// [`PlanRequest`] is built, and the service owns input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    pub selection: String,
    #[serde(default)]
    pub profile: PlanProfile,
}

impl Default for FormInput {
    fn default() -> Self {
        Self::new(PlanProfile::default())
    }
}

impl FormInput {
    /// Creates an empty form for the given profile.
    pub fn new(profile: PlanProfile) -> Self {
        Self {
            age: String::new(),
            weight: String::new(),
            height: String::new(),
            selection: profile.default_selection().to_string(),
            profile,
        }
    }

    /// Replaces exactly one field, leaving the others untouched.
    pub fn set_field(&mut self, field: FormField, raw: impl Into<String>) {
        let raw = raw.into();
        match field {
            FormField::Age => self.age = raw,
            FormField::Weight => self.weight = raw,
            FormField::Height => self.height = raw,
            FormField::Selection => self.selection = raw,
        }
    }

    /// The current weight as the analytics see it.
    pub fn weight_value(&self) -> f64 {
        coerce_number(&self.weight)
    }
}

/// Coerces raw form text into a number.
///
/// Surrounding whitespace is ignored. Empty, unparsable and non-finite
/// input all become `0.0`.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// The selection half of a plan request, keyed by profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSelection {
    Goal(String),
    Activity(String),
}

/// Body of `POST /generate-plan`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRequest {
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    #[serde(flatten)]
    pub selection: PlanSelection,
}

impl PlanRequest {
    /// Builds the request from the form, coercing every numeric field.
    pub fn from_form(form: &FormInput) -> Self {
        let selection = match form.profile {
            PlanProfile::Goal => PlanSelection::Goal(form.selection.clone()),
            PlanProfile::Activity => PlanSelection::Activity(form.selection.clone()),
        };
        Self {
            age: coerce_number(&form.age),
            weight: coerce_number(&form.weight),
            height: coerce_number(&form.height),
            selection,
        }
    }
}
