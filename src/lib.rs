pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{CrossingTime, GrowthModel, SimulationResult, Simulator};
pub use config::SimConfig;
pub use error::SimError;
pub use io::{CurveWriter, ParameterSetReader};
pub use models::{ModelConstants, ModelParameters, ParameterRange, ParameterRanges};
