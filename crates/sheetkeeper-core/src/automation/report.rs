use sheetkeeper_engine::engine::CellRef;

use crate::error::SheetError;

/// A row a sweep could not update.
#[derive(Debug)]
pub struct RowFailure {
    pub cell: CellRef,
    pub error: SheetError,
}

/// Outcome of a manual sweep. Rows fail independently; the sweep keeps going.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Rows examined.
    pub visited: usize,
    /// Cells written.
    pub updated: usize,
    pub failures: Vec<RowFailure>,
}

impl SweepReport {
    pub(crate) fn fail(&mut self, cell: CellRef, error: SheetError) {
        tracing::warn!(%cell, %error, "skipping row");
        self.failures.push(RowFailure { cell, error });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
