//! Plan domain models.
//!
//! A [`PlanResult`] is whatever the plan service computed for one submission.
//! Only a handful of keys are interpreted by the client; everything else is
//! kept verbatim so a persisted plan reads back exactly as it was received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::form::FormInput;

/// The plan service's computed output for one submission.
///
/// Deserialization is lenient: a known key whose value has the wrong shape
/// is left uninterpreted and kept in `extra`, so any JSON object reads back.
/// Numeric strings such as `"24.2"` are accepted as numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct PlanResult {
    /// Overall fitness score, shown as a percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_score: Option<f64>,

    /// Daily caloric target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,

    /// Daily protein target in grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,

    /// Goal as echoed (or inferred) by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,

    /// Free-text recommendation written by the service's model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_plan: Option<String>,

    /// Keys the client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlanResult {
    /// Creates a plan holding only a caloric target.
    pub fn with_calories(calories: f64) -> Self {
        Self {
            calories: Some(calories),
            ..Self::default()
        }
    }
}

impl From<Map<String, Value>> for PlanResult {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            smart_score: take_number(&mut fields, "smartScore"),
            calories: take_number(&mut fields, "calories"),
            protein: take_number(&mut fields, "protein"),
            bmi: take_number(&mut fields, "bmi"),
            goal: take_text(&mut fields, "goal"),
            ai_plan: take_text(&mut fields, "aiPlan"),
            extra: fields,
        }
    }
}

impl From<PlanResult> for Map<String, Value> {
    fn from(plan: PlanResult) -> Self {
        let mut fields = plan.extra;
        let numbers = [
            ("smartScore", plan.smart_score),
            ("calories", plan.calories),
            ("protein", plan.protein),
            ("bmi", plan.bmi),
        ];
        for (key, value) in numbers {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::from(value));
            }
        }
        if let Some(goal) = plan.goal {
            fields.insert("goal".to_string(), Value::String(goal));
        }
        if let Some(ai_plan) = plan.ai_plan {
            fields.insert("aiPlan".to_string(), Value::String(ai_plan));
        }
        fields
    }
}

/// Takes `key` out of the map if it holds a finite number or a numeric string.
///
/// `null` is dropped; any other value stays in the map untouched.
fn take_number(fields: &mut Map<String, Value>, key: &str) -> Option<f64> {
    let number = match fields.get(key)? {
        Value::Null => {
            fields.remove(key);
            return None;
        }
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite());

    if number.is_some() {
        fields.remove(key);
    }
    number
}

/// Takes `key` out of the map if it holds a string.
///
/// `null` is dropped; any other value stays in the map untouched.
fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => {
            fields.insert(key.to_string(), other);
            None
        }
    }
}

/// A plan as it is kept in durable storage.
///
/// The form snapshot lets a rehydrated dashboard show the same prediction
/// the user saw before the restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlan {
    pub plan: PlanResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SavedPlan {
    /// Wraps a freshly generated plan together with the form that produced it.
    pub fn new(plan: PlanResult, form: FormInput) -> Self {
        Self {
            plan,
            form: Some(form),
            saved_at: Some(Utc::now()),
        }
    }
}
