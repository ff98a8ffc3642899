//! Error type shared by the loader, the aggregators and the session.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("unknown city '{0}' (choose chicago, new york city or washington)")]
    UnknownCity(String),

    #[error("invalid month '{0}' (choose all or january through june)")]
    InvalidMonth(String),

    #[error("invalid weekday '{0}' (choose all or monday through sunday)")]
    InvalidDay(String),

    #[error("no trip data found at {}", path.display())]
    DataSourceMissing { path: PathBuf },

    #[error("malformed timestamp '{value}' in record {row}")]
    MalformedData { row: usize, value: String },

    #[error("invalid {column} '{value}' in record {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("no trips match the selected filters")]
    EmptyDataset,

    #[error("column '{0}' is not available for this city")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
