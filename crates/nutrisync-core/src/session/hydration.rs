//! Hydration counter.

use serde::{Deserialize, Serialize};

/// Liters added per action.
pub const STEP_LITERS: f64 = 0.5;
/// Daily hydration target in liters.
pub const CAPACITY_LITERS: f64 = 3.0;

const MAX_STEPS: u8 = 6;

/// Water drunk today, counted in half-liter steps so the level stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HydrationLevel {
    steps: u8,
}

impl HydrationLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds half a liter unless the target is already reached.
    ///
    /// Returns `true` when the level changed.
    pub fn add_water(&mut self) -> bool {
        if self.steps >= MAX_STEPS {
            return false;
        }
        self.steps += 1;
        true
    }

    pub fn liters(&self) -> f64 {
        f64::from(self.steps) * STEP_LITERS
    }

    pub fn is_full(&self) -> bool {
        self.steps >= MAX_STEPS
    }

    /// Fill ratio in percent, `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        self.liters() / CAPACITY_LITERS * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let level = HydrationLevel::new();
        assert_eq!(level.liters(), 0.0);
        assert_eq!(level.percent(), 0.0);
        assert!(!level.is_full());
    }

    #[test]
    fn test_each_add_is_half_a_liter_until_full() {
        let mut level = HydrationLevel::new();
        for i in 1..=6 {
            let before = level.liters();
            assert!(level.add_water());
            assert_eq!(level.liters() - before, 0.5);
            assert_eq!(level.liters(), f64::from(i) * 0.5);
        }
        assert!(level.is_full());
        assert_eq!(level.percent(), 100.0);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut level = HydrationLevel::new();
        for _ in 0..50 {
            level.add_water();
            assert!(level.liters() <= CAPACITY_LITERS);
        }
        assert_eq!(level.liters(), 3.0);
        assert!(!level.add_water());
    }
}
