//! Error types for the Sheetkeeper command line

use sheetkeeper_core::SheetError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur before a command touches the sheet
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to read {path}: file too large ({size} bytes, max {max})")]
    ConfigTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

pub type Result<T> = std::result::Result<T, CliError>;
