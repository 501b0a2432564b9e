//! Error types for Sheetkeeper core.

use sheetkeeper_engine::engine::CellRef;
use thiserror::Error;

/// Errors that can occur while reading, editing or saving a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid timestamp in {cell}: {value:?}")]
    InvalidTimestamp { cell: CellRef, value: String },

    #[error("Cell {0} is outside the sheet")]
    OutOfBounds(CellRef),

    #[error("Sheet unavailable: {0}")]
    HostUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No file path set")]
    NoFilePath,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
