use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::growth::{
    crossing_roots, half_capacity_time, headroom_ratio, treated_growth, treated_series,
    untreated_growth, untreated_series, CrossingTime,
};
use crate::models::{ModelConstants, ModelParameters};

/// Number of time samples used for plotting when none is configured.
pub const DEFAULT_SAMPLES: usize = 300;

/// `samples` evenly spaced points covering `[0, horizon]`, both ends included.
pub fn time_grid(horizon: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = horizon / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
            // Pin the endpoint so accumulated rounding never leaves it short.
            grid[n - 1] = horizon;
            grid
        }
    }
}

/// One evaluation of both curves and the crossing lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub constants: ModelConstants,
    pub parameters: ModelParameters,
    /// Headroom ratio `A = (K - N0) / N0`
    pub headroom: f64,
    pub times: Vec<f64>,
    pub untreated: Vec<f64>,
    pub treated: Vec<f64>,
    pub half_capacity: CrossingTime,
}

impl SimulationResult {
    pub fn half_capacity_level(&self) -> f64 {
        self.constants.half_capacity()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterate `(t, untreated, treated)` triples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.times
            .iter()
            .zip(&self.untreated)
            .zip(&self.treated)
            .map(|((&t, &u), &v)| (t, u, v))
    }
}

/// The growth model bound to one set of session constants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrowthModel {
    constants: ModelConstants,
}

impl GrowthModel {
    pub fn new(constants: ModelConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    pub fn headroom(&self, params: &ModelParameters) -> f64 {
        headroom_ratio(params.initial_population, self.constants.carrying_capacity)
    }

    pub fn untreated_at(&self, t: f64, params: &ModelParameters) -> f64 {
        untreated_growth(t, params.initial_population, self.constants.doubling_time)
    }

    pub fn treated_at(&self, t: f64, params: &ModelParameters) -> f64 {
        treated_growth(
            t,
            params.initial_population,
            self.constants.carrying_capacity,
            params.growth_rate,
            params.treatment_effectiveness,
        )
    }

    pub fn untreated_curve(&self, times: &[f64], params: &ModelParameters) -> Vec<f64> {
        untreated_series(times, params.initial_population, self.constants.doubling_time)
    }

    pub fn treated_curve(&self, times: &[f64], params: &ModelParameters) -> Vec<f64> {
        treated_series(
            times,
            params.initial_population,
            self.constants.carrying_capacity,
            params.growth_rate,
            params.treatment_effectiveness,
        )
    }

    pub fn half_capacity_time(&self, params: &ModelParameters) -> CrossingTime {
        half_capacity_time(
            params.initial_population,
            params.growth_rate,
            params.treatment_effectiveness,
            self.headroom(params),
            self.constants.horizon,
        )
    }

    /// Both roots of the crossing quadratic, ascending, ignoring the horizon.
    pub fn crossing_roots(&self, params: &ModelParameters) -> Option<(f64, f64)> {
        crossing_roots(
            params.growth_rate,
            params.treatment_effectiveness,
            self.headroom(params),
        )
    }

    /// Sample both curves over the horizon and solve for the crossing time.
    pub fn simulate(&self, params: &ModelParameters, samples: usize) -> SimulationResult {
        let times = time_grid(self.constants.horizon, samples);
        let untreated = self.untreated_curve(&times, params);
        let treated = self.treated_curve(&times, params);
        let half_capacity = self.half_capacity_time(params);

        debug!(
            n0 = params.initial_population,
            r = params.growth_rate,
            alpha = params.treatment_effectiveness,
            samples,
            crossing = ?half_capacity,
            "simulation recomputed"
        );

        SimulationResult {
            constants: self.constants,
            parameters: *params,
            headroom: self.headroom(params),
            times,
            untreated,
            treated,
            half_capacity,
        }
    }
}

type Listener = Box<dyn FnMut(&SimulationResult) + Send>;

/// Interactive driver: every parameter change recomputes the curves and
/// notifies the registered listeners with the fresh result.
pub struct Simulator {
    model: GrowthModel,
    parameters: ModelParameters,
    samples: usize,
    listeners: Vec<Listener>,
    latest: SimulationResult,
}

impl Simulator {
    pub fn new(constants: ModelConstants, parameters: ModelParameters, samples: usize) -> Self {
        let model = GrowthModel::new(constants);
        let latest = model.simulate(&parameters, samples);
        Self {
            model,
            parameters,
            samples,
            listeners: Vec::new(),
            latest,
        }
    }

    pub fn model(&self) -> &GrowthModel {
        &self.model
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn latest(&self) -> &SimulationResult {
        &self.latest
    }

    /// Register a callback run after every recompute.
    pub fn on_update<F>(&mut self, listener: F)
    where
        F: FnMut(&SimulationResult) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Recompute with the current parameters and notify listeners.
    pub fn refresh(&mut self) -> &SimulationResult {
        self.latest = self.model.simulate(&self.parameters, self.samples);
        for listener in &mut self.listeners {
            listener(&self.latest);
        }
        &self.latest
    }

    pub fn set_parameters(&mut self, parameters: ModelParameters) -> &SimulationResult {
        self.parameters = parameters;
        self.refresh()
    }

    pub fn set_initial_population(&mut self, value: f64) -> &SimulationResult {
        self.parameters.initial_population = value;
        self.refresh()
    }

    pub fn set_growth_rate(&mut self, value: f64) -> &SimulationResult {
        self.parameters.growth_rate = value;
        self.refresh()
    }

    pub fn set_treatment_effectiveness(&mut self, value: f64) -> &SimulationResult {
        self.parameters.treatment_effectiveness = value;
        self.refresh()
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("model", &self.model)
            .field("parameters", &self.parameters)
            .field("samples", &self.samples)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
