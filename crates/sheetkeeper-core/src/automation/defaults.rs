//! Default priority initializer.

use sheetkeeper_engine::engine::CellValue;
use tracing::info;

use super::report::SweepReport;
use crate::accessor::{CellAccessor, lookup_cell};
use crate::config::SheetConfig;

/// Fill every blank priority cell from row 2 to the grid's last row with the
/// configured default priority.
pub fn fill_default_priorities<A: CellAccessor + ?Sized>(
    sheet: &mut A,
    config: &SheetConfig,
) -> SweepReport {
    fill_priorities_with(sheet, config, &config.default_priority)
}

/// Fill blank priority cells with `default_value`. Non-blank cells are untouched.
pub fn fill_priorities_with<A: CellAccessor + ?Sized>(
    sheet: &mut A,
    config: &SheetConfig,
    default_value: &str,
) -> SweepReport {
    let mut report = SweepReport::default();
    let value = CellValue::from_input(default_value);

    for row in 2..=sheet.max_row_count() {
        let Some(cell) = lookup_cell(&*sheet, config, row, config.columns.priority) else {
            continue;
        };
        report.visited += 1;

        match sheet.is_blank(&cell) {
            Ok(false) => {}
            Ok(true) => match sheet.set_value(&cell, value.clone()) {
                Ok(()) => report.updated += 1,
                Err(err) => report.fail(cell, err),
            },
            Err(err) => report.fail(cell, err),
        }
    }

    info!(
        visited = report.visited,
        filled = report.updated,
        failed = report.failures.len(),
        "filled default priorities"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;
    use crate::error::{Result, SheetError};
    use sheetkeeper_engine::engine::{CellRef, Rgb};

    #[test]
    fn test_fills_blanks_and_keeps_values() {
        let config = SheetConfig::default();
        let mut doc = Document::with_limits(5, 26);
        doc.set_cell_from_input(CellRef::new(1, 7), "Priority").unwrap();
        doc.set_cell_from_input(CellRef::new(3, 7), "2").unwrap();

        let report = fill_default_priorities(&mut doc, &config);
        assert_eq!(report.visited, 4);
        assert_eq!(report.updated, 3);
        assert_eq!(doc.get_cell_display(&CellRef::new(1, 7)), "Priority");
        assert_eq!(doc.get_cell_display(&CellRef::new(2, 7)), "0");
        assert_eq!(doc.get_cell_display(&CellRef::new(3, 7)), "2");
        assert_eq!(doc.get_cell_display(&CellRef::new(5, 7)), "0");
    }

    #[test]
    fn test_fill_is_idempotent() {
        let config = SheetConfig::default();
        let mut doc = Document::with_limits(4, 26);
        fill_default_priorities(&mut doc, &config);
        let second = fill_default_priorities(&mut doc, &config);
        assert_eq!(second.updated, 0);
    }

    #[test]
    fn test_custom_default_value() {
        let config = SheetConfig::default();
        let mut doc = Document::with_limits(3, 26);
        fill_priorities_with(&mut doc, &config, "Low");
        assert_eq!(doc.get_cell_display(&CellRef::new(2, 7)), "Low");
    }

    /// A sheet whose storage rejects writes to one row.
    struct FlakySheet {
        inner: Document,
        broken_row: usize,
    }

    impl CellAccessor for FlakySheet {
        fn in_bounds(&self, cell: &CellRef) -> bool {
            self.inner.in_bounds(cell)
        }

        fn value(&self, cell: &CellRef) -> Result<CellValue> {
            self.inner.value(cell)
        }

        fn set_value(&mut self, cell: &CellRef, value: CellValue) -> Result<()> {
            if cell.row == self.broken_row {
                return Err(SheetError::HostUnavailable("write rejected".into()));
            }
            self.inner.set_value(cell, value)
        }

        fn background(&self, cell: &CellRef) -> Result<Option<Rgb>> {
            self.inner.background(cell)
        }

        fn set_background(&mut self, cell: &CellRef, color: Rgb) -> Result<()> {
            self.inner.set_background(cell, color)
        }

        fn row_count(&self) -> usize {
            self.inner.row_count()
        }

        fn max_row_count(&self) -> usize {
            self.inner.max_row_count()
        }
    }

    #[test]
    fn test_failed_row_does_not_block_the_rest() {
        let config = SheetConfig::default();
        let mut sheet = FlakySheet {
            inner: Document::with_limits(5, 26),
            broken_row: 3,
        };
        let report = fill_default_priorities(&mut sheet, &config);
        assert_eq!(report.updated, 3);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0].error, SheetError::HostUnavailable(_)));
        assert_eq!(sheet.inner.get_cell_display(&CellRef::new(4, 7)), "0");
        assert_eq!(sheet.inner.get_cell_display(&CellRef::new(3, 7)), "");
    }
}
