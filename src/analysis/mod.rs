mod growth;
mod simulation;
mod sweep;

pub use growth::{
    crossing_roots, half_capacity_time, headroom_ratio, treated_growth, treated_series,
    untreated_growth, untreated_series, CrossingTime, DECAY_RATE,
};
pub use simulation::{time_grid, GrowthModel, SimulationResult, Simulator, DEFAULT_SAMPLES};
pub use sweep::{run_sweep, ParameterSet, SweepRow, SweepSummary};
