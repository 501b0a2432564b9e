//! Narrow capability surface over whatever stores the grid.
//!
//! The automation only ever talks to a [`CellAccessor`]; [`crate::Document`]
//! is the in-memory implementation.

use sheetkeeper_engine::engine::{CellRef, CellValue, Rgb};

use crate::config::SheetConfig;
use crate::error::Result;

pub trait CellAccessor {
    /// Whether `cell` addresses a position inside the grid.
    fn in_bounds(&self, cell: &CellRef) -> bool;

    fn value(&self, cell: &CellRef) -> Result<CellValue>;

    fn set_value(&mut self, cell: &CellRef, value: CellValue) -> Result<()>;

    fn is_blank(&self, cell: &CellRef) -> Result<bool> {
        Ok(self.value(cell)?.is_blank())
    }

    fn background(&self, cell: &CellRef) -> Result<Option<Rgb>>;

    fn set_background(&mut self, cell: &CellRef, color: Rgb) -> Result<()>;

    /// Last row holding any non-blank value (0 for an empty grid).
    fn row_count(&self) -> usize;

    /// Number of rows the grid has room for, blank or not.
    fn max_row_count(&self) -> usize;
}

/// Bounds-checked lookup. Coordinates outside the data columns or the grid
/// yield `None` so callers can skip the write without failing.
pub fn lookup_cell<A: CellAccessor + ?Sized>(
    sheet: &A,
    config: &SheetConfig,
    row: usize,
    col: usize,
) -> Option<CellRef> {
    if row < 1 || col < 1 || col > config.number_of_columns {
        return None;
    }
    let cell = CellRef::new(row, col);
    sheet.in_bounds(&cell).then_some(cell)
}
