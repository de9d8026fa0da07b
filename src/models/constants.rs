use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Structural constants shared by every evaluation in a session.
///
/// Carrying capacity is measured in cells, horizon and doubling time in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConstants {
    /// Carrying capacity K: the population the logistic curve approaches
    pub carrying_capacity: f64,
    /// Simulation horizon Tf in days
    pub horizon: f64,
    /// Doubling time Td of the untreated population in days
    pub doubling_time: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            carrying_capacity: 800.0,
            horizon: 40.0,
            doubling_time: 3.5,
        }
    }
}

impl ModelConstants {
    pub fn new(carrying_capacity: f64, horizon: f64, doubling_time: f64) -> Self {
        Self {
            carrying_capacity,
            horizon,
            doubling_time,
        }
    }

    /// Half of carrying capacity, the level the crossing solver targets.
    pub fn half_capacity(&self) -> f64 {
        self.carrying_capacity / 2.0
    }

    /// Validate constants. Returns `SimError::ValidationError` on failure.
    pub fn validate(&self) -> Result<(), SimError> {
        let checks = [
            ("Carrying capacity", self.carrying_capacity),
            ("Horizon", self.horizon),
            ("Doubling time", self.doubling_time),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::ValidationError(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
