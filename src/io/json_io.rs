use std::path::Path;

use crate::analysis::{ParameterSet, SimulationResult, SweepRow};
use crate::error::SimError;

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, SimError> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(content)
}

/// Write a full simulation result (constants, parameters, curves, crossing).
pub fn write_curve_json(
    result: &SimulationResult,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), SimError> {
    std::fs::write(path.as_ref(), to_json(result, pretty)?)?;
    Ok(())
}

/// Read a simulation result previously written by [`write_curve_json`].
pub fn read_curve_json(path: impl AsRef<Path>) -> Result<SimulationResult, SimError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Read parameter sets from a JSON array file.
pub fn read_parameter_sets_json(path: impl AsRef<Path>) -> Result<Vec<ParameterSet>, SimError> {
    let content = std::fs::read(path.as_ref())?;
    read_parameter_sets_json_from_bytes(&content)
}

/// Read parameter sets from JSON bytes.
pub fn read_parameter_sets_json_from_bytes(data: &[u8]) -> Result<Vec<ParameterSet>, SimError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| SimError::ParseError(format!("Invalid UTF-8: {e}")))?;
    let sets: Vec<ParameterSet> = serde_json::from_str(content)?;
    for (i, set) in sets.iter().enumerate() {
        set.parameters()
            .validate()
            .map_err(|e| SimError::ValidationError(format!("Entry {}: {e}", i + 1)))?;
    }
    Ok(sets)
}

/// Write sweep results as a JSON array.
pub fn write_sweep_json(
    rows: &[SweepRow],
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), SimError> {
    std::fs::write(path.as_ref(), to_json(rows, pretty)?)?;
    Ok(())
}
