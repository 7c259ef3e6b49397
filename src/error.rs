use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("Configuration error in '{path}': {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
