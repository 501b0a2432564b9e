//! Edit trigger: the handler the host calls once per cell edit.

use chrono::{DateTime, Utc};
use sheetkeeper_engine::engine::{CellRef, Rgb};
use tracing::debug;

use super::colorizer::stamp_last_modified;
use super::consistency::apply_consistency_rule;
use crate::accessor::CellAccessor;
use crate::config::SheetConfig;
use crate::error::Result;

/// Payload delivered by the host after a user edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditEvent {
    pub cell: CellRef,
}

impl EditEvent {
    pub fn new(cell: CellRef) -> Self {
        EditEvent { cell }
    }
}

/// What one edit changed besides the edited cell itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Date cell stamped with the edit time and its new background.
    pub stamped: Option<(CellRef, Rgb)>,
    /// Cell overwritten by the consistency rule.
    pub forced: Option<CellRef>,
}

/// Handle one edit.
///
/// The edited row's date cell is always stamped and recoloured first. The
/// consistency rule only runs for important cells (below the header, in a
/// role-mapped column).
pub fn on_edit<A: CellAccessor + ?Sized>(
    sheet: &mut A,
    config: &SheetConfig,
    event: &EditEvent,
    now: DateTime<Utc>,
) -> Result<EditOutcome> {
    let mut outcome = EditOutcome {
        stamped: stamp_last_modified(sheet, config, event.cell.row, now)?,
        forced: None,
    };

    if !config.columns.is_important(&event.cell) {
        debug!(cell = %event.cell, "edit outside watched cells");
        return Ok(outcome);
    }

    outcome.forced = apply_consistency_rule(sheet, config, &event.cell)?;
    Ok(outcome)
}
