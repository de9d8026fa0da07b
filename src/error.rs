use thiserror::Error;

/// Errors that can occur while configuring, running or exporting simulations.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<calamine::Error> for SimError {
    fn from(e: calamine::Error) -> Self {
        SimError::Excel(e.to_string())
    }
}

impl From<calamine::XlsxError> for SimError {
    fn from(e: calamine::XlsxError) -> Self {
        SimError::Excel(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SimError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SimError::Excel(e.to_string())
    }
}
