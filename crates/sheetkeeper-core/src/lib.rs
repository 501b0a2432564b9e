//! sheetkeeper-core - Sheet document model, storage and edit automation.

pub mod accessor;
pub mod automation;
pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use accessor::{CellAccessor, lookup_cell};
pub use config::SheetConfig;
pub use document::Document;
pub use error::{Result, SheetError};

pub use sheetkeeper_engine::engine::{CellRef, CellValue, Rgb};
