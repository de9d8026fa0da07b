use serde::{Deserialize, Serialize};

use super::ModelParameters;

/// Slider range for one parameter in the interactive front ends.
///
/// These bounds belong to the presentation layer. The growth functions
/// accept any value in their mathematical domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into the range and round to the nearest slider step.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        // Re-clamp: rounding up the last partial step can overshoot max.
        (self.min + steps * self.step).min(self.max)
    }
}

/// Slider ranges for the three variable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRanges {
    pub initial_population: ParameterRange,
    pub growth_rate: ParameterRange,
    pub treatment_effectiveness: ParameterRange,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            initial_population: ParameterRange::new(10.0, 200.0, 10.0),
            growth_rate: ParameterRange::new(0.05, 1.0, 0.05),
            treatment_effectiveness: ParameterRange::new(0.001, 0.05, 0.001),
        }
    }
}

impl ParameterRanges {
    /// Describe every parameter that falls outside its slider range.
    pub fn out_of_range(&self, params: &ModelParameters) -> Vec<String> {
        let checks = [
            ("N0", params.initial_population, &self.initial_population),
            ("r", params.growth_rate, &self.growth_rate),
            ("alpha", params.treatment_effectiveness, &self.treatment_effectiveness),
        ];
        checks
            .iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(name, value, range)| {
                format!("{name} = {value} is outside [{}, {}]", range.min, range.max)
            })
            .collect()
    }

    /// Snap every parameter onto its slider grid.
    pub fn snap(&self, params: &ModelParameters) -> ModelParameters {
        ModelParameters {
            initial_population: self.initial_population.snap(params.initial_population),
            growth_rate: self.growth_rate.snap(params.growth_rate),
            treatment_effectiveness: self
                .treatment_effectiveness
                .snap(params.treatment_effectiveness),
        }
    }
}
