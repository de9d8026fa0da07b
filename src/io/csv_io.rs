use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{ParameterSet, SimulationResult, SweepRow};
use crate::error::SimError;

/// CSV row structure for sampled curves.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CurveRow {
    pub time: f64,
    pub untreated: f64,
    pub treated: f64,
}

/// CSV row structure for sweep results.
#[derive(Debug, Serialize)]
struct SweepCsvRow<'a> {
    label: &'a str,
    initial_population: f64,
    growth_rate: f64,
    treatment_effectiveness: f64,
    headroom: f64,
    half_capacity_time: Option<f64>,
    final_untreated: f64,
    final_treated: f64,
}

fn write_curve_records<W: Write>(
    wtr: &mut csv::Writer<W>,
    result: &SimulationResult,
) -> Result<(), SimError> {
    for (time, untreated, treated) in result.points() {
        wtr.serialize(CurveRow {
            time,
            untreated,
            treated,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the sampled curves as `time,untreated,treated` rows.
pub fn write_curve_csv(result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    write_curve_records(&mut wtr, result)
}

/// Render the sampled curves as CSV bytes.
pub fn curve_csv_bytes(result: &SimulationResult) -> Result<Vec<u8>, SimError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_curve_records(&mut wtr, result)?;
    wtr.into_inner()
        .map_err(|e| SimError::Io(std::io::Error::other(e.to_string())))
}

fn parse_parameter_records<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<Vec<ParameterSet>, SimError> {
    let mut sets = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let set: ParameterSet = result?;
        set.parameters().validate().map_err(|e| {
            SimError::ValidationError(format!("Row {}: {e}", i + 1))
        })?;
        sets.push(set);
    }
    Ok(sets)
}

fn parameter_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::All);
    builder
}

/// Read parameter sets from a CSV file with columns
/// `label,initial_population,growth_rate,treatment_effectiveness`.
pub fn read_parameter_sets_csv(path: impl AsRef<Path>) -> Result<Vec<ParameterSet>, SimError> {
    let mut rdr = parameter_reader().from_path(path.as_ref())?;
    parse_parameter_records(&mut rdr)
}

/// Read parameter sets from CSV bytes.
pub fn read_parameter_sets_csv_from_bytes(data: &[u8]) -> Result<Vec<ParameterSet>, SimError> {
    let mut rdr = parameter_reader().from_reader(data);
    parse_parameter_records(&mut rdr)
}

/// Write sweep results to a CSV file.
pub fn write_sweep_csv(rows: &[SweepRow], path: impl AsRef<Path>) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;

    for row in rows {
        wtr.serialize(SweepCsvRow {
            label: row.label.as_deref().unwrap_or(""),
            initial_population: row.parameters.initial_population,
            growth_rate: row.parameters.growth_rate,
            treatment_effectiveness: row.parameters.treatment_effectiveness,
            headroom: row.headroom,
            half_capacity_time: row.half_capacity.time(),
            final_untreated: row.final_untreated,
            final_treated: row.final_treated,
        })?;
    }

    wtr.flush()?;
    Ok(())
}
