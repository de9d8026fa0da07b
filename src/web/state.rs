use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::{SimulationResult, Simulator};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::models::ModelParameters;

/// Maximum number of live sessions before the oldest is evicted.
const MAX_SESSIONS: usize = 100;
/// Time-to-live for an idle session (2 hours).
const SESSION_TTL_SECS: u64 = 2 * 60 * 60;

/// Partial parameter change sent by a slider.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterUpdate {
    pub initial_population: Option<f64>,
    pub growth_rate: Option<f64>,
    pub treatment_effectiveness: Option<f64>,
}

impl ParameterUpdate {
    pub fn apply(&self, base: &ModelParameters) -> ModelParameters {
        ModelParameters {
            initial_population: self.initial_population.unwrap_or(base.initial_population),
            growth_rate: self.growth_rate.unwrap_or(base.growth_rate),
            treatment_effectiveness: self
                .treatment_effectiveness
                .unwrap_or(base.treatment_effectiveness),
        }
    }
}

type Sessions = HashMap<Uuid, (Instant, Simulator)>;

pub struct AppState {
    pub config: SimConfig,
    sessions: Mutex<Sessions>,
}

impl AppState {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a session and return its id with the initial result.
    pub fn create_session(&self, parameters: ModelParameters, samples: usize) -> (Uuid, SimulationResult) {
        let simulator = Simulator::new(self.config.constants, parameters, samples);
        let result = simulator.latest().clone();
        let id = Uuid::new_v4();

        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        evict_expired(&mut map);
        if map.len() >= MAX_SESSIONS {
            evict_oldest(&mut map);
        }
        map.insert(id, (Instant::now(), simulator));
        info!(%id, sessions = map.len(), "session created");

        (id, result)
    }

    pub fn session_result(&self, id: &Uuid) -> Option<SimulationResult> {
        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        evict_expired(&mut map);
        map.get(id).map(|(_, sim)| sim.latest().clone())
    }

    /// Apply a partial update to a session and recompute.
    ///
    /// Merge, validation and recompute happen under one lock so concurrent
    /// updates to different sliders compose. An invalid result leaves the
    /// session untouched. Returns `None` for an unknown session.
    pub fn apply_update(
        &self,
        id: &Uuid,
        update: &ParameterUpdate,
    ) -> Option<Result<SimulationResult, SimError>> {
        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        evict_expired(&mut map);
        map.get_mut(id).map(|(touched, sim)| -> Result<SimulationResult, SimError> {
            let parameters = update.apply(sim.parameters());
            parameters.validate()?;
            *touched = Instant::now();
            Ok(sim.set_parameters(parameters).clone())
        })
    }

    pub fn remove_session(&self, id: &Uuid) -> bool {
        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        map.remove(id).is_some()
    }

    pub fn session_count(&self) -> usize {
        let mut map = self.sessions.lock().expect("sessions mutex poisoned");
        evict_expired(&mut map);
        map.len()
    }
}

fn evict_expired(map: &mut Sessions) {
    if let Some(cutoff) = Instant::now().checked_sub(Duration::from_secs(SESSION_TTL_SECS)) {
        map.retain(|_, (touched, _)| *touched > cutoff);
    }
}

fn evict_oldest(map: &mut Sessions) {
    if let Some(oldest_id) = map.iter().min_by_key(|(_, (t, _))| *t).map(|(id, _)| *id) {
        map.remove(&oldest_id);
    }
}
