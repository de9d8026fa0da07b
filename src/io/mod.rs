mod csv_io;
mod excel_io;
mod json_io;

use std::path::Path;

use crate::analysis::{ParameterSet, SimulationResult};
use crate::error::SimError;

pub use csv_io::{
    curve_csv_bytes, read_parameter_sets_csv, read_parameter_sets_csv_from_bytes,
    write_curve_csv, write_sweep_csv,
};
pub use excel_io::{
    read_parameter_sets_excel, read_parameter_sets_excel_from_bytes, write_curve_excel,
};
pub use json_io::{
    read_curve_json, read_parameter_sets_json, read_parameter_sets_json_from_bytes,
    write_curve_json, write_sweep_json,
};

/// File formats understood by the readers and writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Excel,
}

impl FileFormat {
    /// Pick a format from a file extension (`csv`, `json`, `xlsx`/`xls`).
    pub fn from_extension(ext: &str) -> Result<Self, SimError> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "xlsx" | "xls" => Ok(FileFormat::Excel),
            _ => Err(SimError::ParseError(format!(
                "Unsupported file format: .{ext}. Use .csv, .json, or .xlsx"
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }
}

/// Trait for writing sampled curves to a file.
pub trait CurveWriter {
    fn write(&self, result: &SimulationResult, path: &Path) -> Result<(), SimError>;
}

/// Trait for reading batches of parameter sets from a file.
pub trait ParameterSetReader {
    fn read(&self, path: &Path) -> Result<Vec<ParameterSet>, SimError>;
}

/// CSV format reader/writer.
pub struct CsvFormat;

impl CurveWriter for CsvFormat {
    fn write(&self, result: &SimulationResult, path: &Path) -> Result<(), SimError> {
        write_curve_csv(result, path)
    }
}

impl ParameterSetReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<Vec<ParameterSet>, SimError> {
        read_parameter_sets_csv(path)
    }
}

/// JSON format reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl CurveWriter for JsonFormat {
    fn write(&self, result: &SimulationResult, path: &Path) -> Result<(), SimError> {
        write_curve_json(result, path, self.pretty)
    }
}

impl ParameterSetReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<Vec<ParameterSet>, SimError> {
        read_parameter_sets_json(path)
    }
}

/// Excel (.xlsx) format reader/writer.
pub struct ExcelFormat;

impl CurveWriter for ExcelFormat {
    fn write(&self, result: &SimulationResult, path: &Path) -> Result<(), SimError> {
        write_curve_excel(result, path)
    }
}

impl ParameterSetReader for ExcelFormat {
    fn read(&self, path: &Path) -> Result<Vec<ParameterSet>, SimError> {
        read_parameter_sets_excel(path)
    }
}

/// Write curves in the format implied by the path's extension.
pub fn write_curves(result: &SimulationResult, path: &Path, pretty: bool) -> Result<(), SimError> {
    let writer: Box<dyn CurveWriter> = match FileFormat::from_path(path)? {
        FileFormat::Csv => Box::new(CsvFormat),
        FileFormat::Json => Box::new(JsonFormat { pretty }),
        FileFormat::Excel => Box::new(ExcelFormat),
    };
    writer.write(result, path)
}

/// Read parameter sets in the format implied by the path's extension.
pub fn read_parameter_sets(path: &Path) -> Result<Vec<ParameterSet>, SimError> {
    let reader: Box<dyn ParameterSetReader> = match FileFormat::from_path(path)? {
        FileFormat::Csv => Box::new(CsvFormat),
        FileFormat::Json => Box::new(JsonFormat::default()),
        FileFormat::Excel => Box::new(ExcelFormat),
    };
    reader.read(path)
}

/// Read parameter sets from uploaded bytes of the given format.
pub fn read_parameter_sets_from_bytes(
    data: &[u8],
    format: FileFormat,
) -> Result<Vec<ParameterSet>, SimError> {
    match format {
        FileFormat::Csv => read_parameter_sets_csv_from_bytes(data),
        FileFormat::Json => read_parameter_sets_json_from_bytes(data),
        FileFormat::Excel => read_parameter_sets_excel_from_bytes(data),
    }
}
