use thiserror::Error;

use common::error::Error as GraphError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Graph processing error: {0}")]
    GraphError(#[from] GraphError),

    #[error("Path producer failed: {0}")]
    ProducerFailed(String),
}
