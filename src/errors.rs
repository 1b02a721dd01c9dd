use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array of rows")]
    NotAnArray,

    #[error("Field access error: {field} is {found}")]
    FieldAccess { field: &'static str, found: String },

    #[error("Invalid time value: {0}")]
    InvalidTime(f64),

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Benchmark log line {line}: {message}")]
    BenchLog { line: usize, message: String },

    #[error("Regex: {0}")]
    Regex(#[from] regex::Error),
}
