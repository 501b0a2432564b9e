//! Timestamp stamping and age-based recolouring of the date column.

use chrono::{DateTime, Utc};
use sheetkeeper_engine::engine::{CellRef, CellValue, FadeConfig, Rgb, color_for_age};
use tracing::{debug, info};

use super::report::SweepReport;
use crate::accessor::{CellAccessor, lookup_cell};
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};

/// Recolour one cell from the timestamp it holds.
pub fn recolor_cell<A: CellAccessor + ?Sized>(
    sheet: &mut A,
    fade: &FadeConfig,
    cell: &CellRef,
    now: DateTime<Utc>,
) -> Result<Rgb> {
    let value = sheet.value(cell)?;
    let timestamp = value
        .as_timestamp()
        .ok_or_else(|| SheetError::InvalidTimestamp {
            cell: cell.clone(),
            value: value.to_string(),
        })?;
    let color = color_for_age(timestamp, now, fade);
    debug!(%cell, %color, "recolouring timestamp");
    sheet.set_background(cell, color)?;
    Ok(color)
}

/// Write `now` into the date column of `row` and recolour it.
/// Returns `None` when the row has no addressable date cell.
pub fn stamp_last_modified<A: CellAccessor + ?Sized>(
    sheet: &mut A,
    config: &SheetConfig,
    row: usize,
    now: DateTime<Utc>,
) -> Result<Option<(CellRef, Rgb)>> {
    let Some(cell) = lookup_cell(&*sheet, config, row, config.columns.date) else {
        return Ok(None);
    };
    sheet.set_value(&cell, CellValue::Timestamp(now))?;
    let color = recolor_cell(sheet, &config.fade, &cell, now)?;
    Ok(Some((cell, color)))
}

/// Reapply the age colour to every timestamp in the date column.
///
/// Scans down from row 2 and stops at the first blank date cell: the data is
/// assumed to be packed, so a blank marks the end. A cell that fails (for
/// example text that is not a date) is recorded and the sweep continues.
pub fn recolor_all_timestamps<A: CellAccessor + ?Sized>(
    sheet: &mut A,
    config: &SheetConfig,
    now: DateTime<Utc>,
) -> SweepReport {
    let mut report = SweepReport::default();
    let last_row = sheet.row_count();

    for row in 2..=last_row {
        let Some(cell) = lookup_cell(&*sheet, config, row, config.columns.date) else {
            break;
        };
        match sheet.is_blank(&cell) {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => {
                report.visited += 1;
                report.fail(cell, err);
                continue;
            }
        }

        report.visited += 1;
        match recolor_cell(sheet, &config.fade, &cell, now) {
            Ok(_) => report.updated += 1,
            Err(err) => report.fail(cell, err),
        }
    }

    info!(
        visited = report.visited,
        updated = report.updated,
        failed = report.failures.len(),
        "recoloured timestamps"
    );
    report
}
