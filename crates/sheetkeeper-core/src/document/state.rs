use sheetkeeper_engine::engine::{CellRef, Grid, new_grid};
use std::path::PathBuf;

use crate::config::SheetConfig;
use crate::error::Result;

/// Default grid height for a new document.
pub(crate) const DEFAULT_MAX_ROWS: usize = 1000;
/// Default grid width for a new document (A..Z).
pub(crate) const DEFAULT_MAX_COLS: usize = 26;

/// In-memory sheet. Implements [`crate::CellAccessor`].
pub struct Document {
    /// The sheet grid (DashMap is internally Arc-based, clones are cheap)
    pub grid: Grid,
    /// Rows the grid has room for
    pub max_rows: usize,
    /// Columns the grid has room for
    pub max_cols: usize,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the grid has been modified
    pub modified: bool,
}

impl Document {
    /// Create an empty document with the default grid size.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_ROWS, DEFAULT_MAX_COLS)
    }

    pub fn with_limits(max_rows: usize, max_cols: usize) -> Self {
        Document {
            grid: new_grid(),
            max_rows,
            max_cols,
            file_path: None,
            modified: false,
        }
    }

    /// Empty document sized for `config`: `max_rows` rows and at least the data columns.
    pub fn for_config(config: &SheetConfig) -> Self {
        Self::with_limits(config.max_rows, config.number_of_columns.max(DEFAULT_MAX_COLS))
    }

    /// Create a document sized for `config` and load a file if provided.
    /// A path that does not exist yet becomes the save target of an empty document.
    pub fn with_file(path: Option<PathBuf>, config: &SheetConfig) -> Result<Self> {
        let mut doc = Self::for_config(config);

        if let Some(ref p) = path {
            if p.exists() {
                doc.load_file(p)?;
            } else {
                doc.file_path = Some(p.clone());
                doc.modified = false;
            }
        }
        Ok(doc)
    }

    /// Grow the grid so `cell` fits. Loaded files may reach past the default size.
    pub(crate) fn grow_to_fit(&mut self, cell: &CellRef) {
        self.max_rows = self.max_rows.max(cell.row);
        self.max_cols = self.max_cols.max(cell.col);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
