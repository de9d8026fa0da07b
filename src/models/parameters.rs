use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Parameters that vary between evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParameters {
    /// Initial population N0 (cells)
    pub initial_population: f64,
    /// Logistic growth rate r (per day)
    pub growth_rate: f64,
    /// Treatment effectiveness alpha (per day)
    pub treatment_effectiveness: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            initial_population: 50.0,
            growth_rate: 0.25,
            treatment_effectiveness: 0.01,
        }
    }
}

impl ModelParameters {
    pub fn new(initial_population: f64, growth_rate: f64, treatment_effectiveness: f64) -> Self {
        Self {
            initial_population,
            growth_rate,
            treatment_effectiveness,
        }
    }

    /// Validate the model domain: `N0 > 0`, `r > 0`, `alpha >= 0`.
    ///
    /// Slider ranges are not checked here; see [`crate::models::ParameterRanges`].
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.initial_population.is_finite() || self.initial_population <= 0.0 {
            return Err(SimError::ValidationError(format!(
                "Initial population must be positive, got {}",
                self.initial_population
            )));
        }
        if !self.growth_rate.is_finite() || self.growth_rate <= 0.0 {
            return Err(SimError::ValidationError(format!(
                "Growth rate must be positive, got {}",
                self.growth_rate
            )));
        }
        if !self.treatment_effectiveness.is_finite() || self.treatment_effectiveness < 0.0 {
            return Err(SimError::ValidationError(format!(
                "Treatment effectiveness must be non-negative, got {}",
                self.treatment_effectiveness
            )));
        }
        Ok(())
    }
}
