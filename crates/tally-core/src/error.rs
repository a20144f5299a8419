//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Any failure while producing insights. The underlying cause is kept as
    /// the error source so callers can log it without matching on it.
    #[error("Insights generation failed: {0}")]
    InsightsFailed(#[source] Box<Error>),
}

impl Error {
    /// Wrap an error as an insights-generation failure (idempotent)
    pub fn insights_failed(err: Error) -> Self {
        match err {
            Error::InsightsFailed(_) => err,
            other => Error::InsightsFailed(Box::new(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
