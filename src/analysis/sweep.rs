use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::analysis::{CrossingTime, GrowthModel};
use crate::error::SimError;
use crate::models::ModelParameters;

/// One parameter combination in a batch evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(default)]
    pub label: Option<String>,
    pub initial_population: f64,
    pub growth_rate: f64,
    pub treatment_effectiveness: f64,
}

impl ParameterSet {
    pub fn parameters(&self) -> ModelParameters {
        ModelParameters::new(
            self.initial_population,
            self.growth_rate,
            self.treatment_effectiveness,
        )
    }
}

impl From<ModelParameters> for ParameterSet {
    fn from(p: ModelParameters) -> Self {
        Self {
            label: None,
            initial_population: p.initial_population,
            growth_rate: p.growth_rate,
            treatment_effectiveness: p.treatment_effectiveness,
        }
    }
}

/// Result of evaluating one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub label: Option<String>,
    pub parameters: ModelParameters,
    pub headroom: f64,
    pub half_capacity: CrossingTime,
    /// Untreated population at the horizon
    pub final_untreated: f64,
    /// Treated population at the horizon
    pub final_treated: f64,
}

/// Evaluate every parameter set against the same model.
///
/// Each set is validated first; the first invalid one aborts the sweep.
pub fn run_sweep(model: &GrowthModel, sets: &[ParameterSet]) -> Result<Vec<SweepRow>, SimError> {
    let horizon = model.constants().horizon;

    sets.iter()
        .enumerate()
        .map(|(i, set)| {
            let params = set.parameters();
            params.validate().map_err(|e| {
                SimError::ValidationError(format!("Parameter set {}: {e}", i + 1))
            })?;
            Ok(SweepRow {
                label: set.label.clone(),
                parameters: params,
                headroom: model.headroom(&params),
                half_capacity: model.half_capacity_time(&params),
                final_untreated: model.untreated_at(horizon, &params),
                final_treated: model.treated_at(horizon, &params),
            })
        })
        .collect()
}

/// Aggregate view over the crossing times found in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub total: usize,
    pub found: usize,
    pub min_time: Option<f64>,
    pub max_time: Option<f64>,
    pub mean_time: Option<f64>,
    /// Sample standard deviation; needs at least two crossings
    pub std_dev_time: Option<f64>,
}

impl SweepSummary {
    pub fn compute(rows: &[SweepRow]) -> Result<Self, SimError> {
        if rows.is_empty() {
            return Err(SimError::InsufficientData(
                "Sweep contains no parameter sets".to_string(),
            ));
        }

        let times: Vec<f64> = rows.iter().filter_map(|r| r.half_capacity.time()).collect();

        let (min_time, max_time, mean_time) = if times.is_empty() {
            (None, None, None)
        } else {
            (
                Some(Statistics::min(&times)),
                Some(Statistics::max(&times)),
                Some(Statistics::mean(&times)),
            )
        };
        let std_dev_time = if times.len() >= 2 {
            Some(Statistics::std_dev(&times))
        } else {
            None
        };

        Ok(Self {
            total: rows.len(),
            found: times.len(),
            min_time,
            max_time,
            mean_time,
            std_dev_time,
        })
    }
}
