//! Derived analytics computed from the current form.
//!
//! Everything here is pure. Callers recompute on every read instead of
//! caching, since the inputs are tiny.

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Number of days covered by the weight prediction.
pub const PREDICTION_DAYS: u32 = 30;
/// Weight lost per predicted day.
pub const DAILY_DECREMENT: f64 = 0.05;

pub const FAT_LOSS_INSIGHT: &str = "AI Insight: Maintain high protein and reduce refined carbs.";
pub const MUSCLE_GAIN_INSIGHT: &str =
    "AI Insight: Increase protein intake and maintain calorie surplus.";
pub const MAINTENANCE_INSIGHT: &str = "AI Insight: Balanced macros recommended for maintenance.";

/// Goals the insight text knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    #[default]
    Maintenance,
}

impl Goal {
    /// Parses a goal, falling back to maintenance for anything unrecognized.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    pub fn insight(self) -> &'static str {
        match self {
            Goal::FatLoss => FAT_LOSS_INSIGHT,
            Goal::MuscleGain => MUSCLE_GAIN_INSIGHT,
            Goal::Maintenance => MAINTENANCE_INSIGHT,
        }
    }
}

/// Maps a goal to its insight text. Unknown goals get the maintenance text.
pub fn compute_insight(goal: &str) -> &'static str {
    Goal::parse_lenient(goal).insight()
}

/// One day of the weight prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// 1-based day index.
    pub day: u32,
    /// Unrounded prediction, `start - 0.05 * day`.
    pub raw: f64,
    /// Prediction rounded to one decimal place, as charted.
    pub weight: f64,
}

/// Lazy 30-day linear weight prediction.
///
/// The model is a fixed placeholder: every day subtracts
/// [`DAILY_DECREMENT`] from the starting weight whatever the goal is.
#[derive(Debug, Clone)]
pub struct WeightPrediction {
    start: f64,
    next_day: u32,
}

impl WeightPrediction {
    pub fn new(start: f64) -> Self {
        Self { start, next_day: 1 }
    }
}

impl Iterator for WeightPrediction {
    type Item = PredictionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_day > PREDICTION_DAYS {
            return None;
        }
        let day = self.next_day;
        self.next_day += 1;

        let raw = self.start - DAILY_DECREMENT * f64::from(day);
        Some(PredictionPoint {
            day,
            raw,
            weight: round_to_tenth(raw),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (PREDICTION_DAYS + 1).saturating_sub(self.next_day) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WeightPrediction {}

impl std::iter::FusedIterator for WeightPrediction {}

/// Builds the prediction for a starting weight.
///
/// `goal` is accepted for call-site symmetry with [`compute_insight`] but
/// does not influence the series.
pub fn compute_weight_prediction(start_weight: f64, _goal: &str) -> WeightPrediction {
    WeightPrediction::new(start_weight)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
