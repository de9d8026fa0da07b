//! TOML configuration for the simulator.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults of the interactive simulator:
//!
//! ```toml
//! [constants]
//! carrying_capacity = 800.0
//! horizon = 40.0
//! doubling_time = 3.5
//!
//! [parameters]
//! initial_population = 50.0
//! growth_rate = 0.25
//! treatment_effectiveness = 0.01
//!
//! [simulation]
//! samples = 300
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::DEFAULT_SAMPLES;
use crate::error::SimError;
use crate::models::{ModelConstants, ModelParameters};

/// Sampling settings for curve evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Number of time points spanning `[0, horizon]`
    pub samples: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// Full simulator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub constants: ModelConstants,
    /// Starting parameters; the CLI flags and UI sliders override these
    pub parameters: ModelParameters,
    pub simulation: SimulationSettings,
}

impl SimConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SimError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Load `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SimError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.constants.validate()?;
        self.parameters.validate()?;
        if self.simulation.samples < 2 {
            return Err(SimError::ValidationError(format!(
                "At least 2 samples are required, got {}",
                self.simulation.samples
            )));
        }
        Ok(())
    }

    /// Serialize back to TOML text.
    pub fn to_toml_string(&self) -> Result<String, SimError> {
        toml::to_string_pretty(self)
            .map_err(|e| SimError::ParseError(format!("Cannot serialize config: {e}")))
    }
}
