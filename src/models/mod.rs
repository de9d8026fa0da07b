mod constants;
mod controls;
mod parameters;

pub use constants::ModelConstants;
pub use controls::{ParameterRange, ParameterRanges};
pub use parameters::ModelParameters;
