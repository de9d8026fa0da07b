use std::path::Path;

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::analysis::{ParameterSet, SimulationResult};
use crate::error::SimError;

const PARAMETER_HEADERS: [&str; 4] = [
    "label",
    "initial_population",
    "growth_rate",
    "treatment_effectiveness",
];

/// Locate each parameter column by header name (case-insensitive).
fn header_positions(header: &[Data]) -> Result<[Option<usize>; 4], SimError> {
    let names: Vec<String> = header
        .iter()
        .map(|c| c.to_string().trim().to_lowercase())
        .collect();
    let mut positions = [None; 4];
    for (slot, wanted) in positions.iter_mut().zip(PARAMETER_HEADERS) {
        *slot = names.iter().position(|n| n == wanted);
    }
    for (pos, name) in positions.iter().zip(PARAMETER_HEADERS).skip(1) {
        if pos.is_none() {
            return Err(SimError::Excel(format!("Missing column '{name}'")));
        }
    }
    Ok(positions)
}

/// Read parameter sets from the first worksheet of an Excel (.xlsx) file.
///
/// Expects a header row naming the columns `initial_population`,
/// `growth_rate`, `treatment_effectiveness` and optionally `label`.
/// Entirely empty rows are skipped.
pub fn read_parameter_sets_excel(path: impl AsRef<Path>) -> Result<Vec<ParameterSet>, SimError> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SimError::Excel("No sheets found in workbook".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let header = rows
        .next()
        .ok_or_else(|| SimError::Excel("Worksheet is empty".to_string()))?;
    let [label_col, n0_col, r_col, alpha_col] = header_positions(header)?;

    let mut sets = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|c| c.is_empty()) {
            continue;
        }

        let get_f64 = |col: Option<usize>, name: &str| -> Result<f64, SimError> {
            col.and_then(|idx| row.get(idx))
                .and_then(|c| c.as_f64())
                .ok_or_else(|| {
                    SimError::ParseError(format!("Row {}: '{name}' is not a number", i + 2))
                })
        };

        let label = label_col
            .and_then(|idx| row.get(idx))
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string());

        let set = ParameterSet {
            label,
            initial_population: get_f64(n0_col, "initial_population")?,
            growth_rate: get_f64(r_col, "growth_rate")?,
            treatment_effectiveness: get_f64(alpha_col, "treatment_effectiveness")?,
        };
        set.parameters()
            .validate()
            .map_err(|e| SimError::ValidationError(format!("Row {}: {e}", i + 2)))?;
        sets.push(set);
    }

    Ok(sets)
}

/// Read parameter sets from Excel bytes.
pub fn read_parameter_sets_excel_from_bytes(data: &[u8]) -> Result<Vec<ParameterSet>, SimError> {
    use std::io::Write;
    let mut tmp = tempfile::NamedTempFile::new()?;
    tmp.write_all(data)?;
    tmp.flush()?;
    read_parameter_sets_excel(tmp.path())
}

/// Write the sampled curves to an Excel (.xlsx) file.
///
/// Sheet `curves` holds `time, untreated, treated`; sheet `parameters`
/// records the constants, parameters and the half-capacity time.
pub fn write_curve_excel(result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), SimError> {
    let mut workbook = Workbook::new();

    let curves = workbook.add_worksheet();
    curves.set_name("curves")?;
    for (col, header) in ["time", "untreated", "treated"].iter().enumerate() {
        curves.write_string(0, col as u16, *header)?;
    }
    for (i, (t, untreated, treated)) in result.points().enumerate() {
        let row = i as u32 + 1;
        curves.write_number(row, 0, t)?;
        curves.write_number(row, 1, untreated)?;
        curves.write_number(row, 2, treated)?;
    }

    let summary = workbook.add_worksheet();
    summary.set_name("parameters")?;
    let c = &result.constants;
    let p = &result.parameters;
    let entries = [
        ("carrying_capacity", Some(c.carrying_capacity)),
        ("horizon", Some(c.horizon)),
        ("doubling_time", Some(c.doubling_time)),
        ("initial_population", Some(p.initial_population)),
        ("growth_rate", Some(p.growth_rate)),
        ("treatment_effectiveness", Some(p.treatment_effectiveness)),
        ("headroom", Some(result.headroom)),
        ("half_capacity_time", result.half_capacity.time()),
    ];
    summary.write_string(0, 0, "name")?;
    summary.write_string(0, 1, "value")?;
    for (i, (name, value)) in entries.iter().enumerate() {
        let row = i as u32 + 1;
        summary.write_string(row, 0, *name)?;
        match value {
            Some(v) => summary.write_number(row, 1, *v)?,
            None => summary.write_string(row, 1, "not reached")?,
        };
    }

    workbook.save(path.as_ref())?;
    Ok(())
}
