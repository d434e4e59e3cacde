//! Error types for Stockpile

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockpileError {
    #[error("Warehouse {0} not found")]
    NotFound(u64),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StockpileError>;
