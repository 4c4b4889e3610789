//! Progress series built from the service's weight history.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// 1-based position in the history.
    pub day: u32,
    pub weight: f64,
}

/// Ordered weight history. Always rebuilt wholesale, never appended to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressSeries {
    points: Vec<ProgressPoint>,
}

impl ProgressSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from the history returned by the service.
    pub fn from_weights(weights: impl IntoIterator<Item = f64>) -> Self {
        let points = weights
            .into_iter()
            .zip(1u32..)
            .map(|(weight, day)| ProgressPoint { day, weight })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[ProgressPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}
