//! STATUS/PRIORITY consistency rule.

use sheetkeeper_engine::engine::{CellRef, CellValue, rule_for};
use tracing::debug;

use crate::accessor::{CellAccessor, lookup_cell};
use crate::config::SheetConfig;
use crate::error::Result;

/// Apply the rule fired by an edit to `edited`, if its column has one.
///
/// Returns the cell that was forced. Missing rules, out-of-range lookups and
/// non-matching values all leave the sheet untouched.
pub fn apply_consistency_rule<A: CellAccessor + ?Sized>(
    sheet: &mut A,
    config: &SheetConfig,
    edited: &CellRef,
) -> Result<Option<CellRef>> {
    let Some(role) = config.columns.role_of(edited.col) else {
        return Ok(None);
    };
    let rules = config.rules();
    let Some(rule) = rule_for(&rules, role) else {
        return Ok(None);
    };

    let row = edited.row;
    let (Some(antecedent), Some(consequent)) = (
        lookup_cell(&*sheet, config, row, config.columns.column(rule.when)),
        lookup_cell(&*sheet, config, row, config.columns.column(rule.then)),
    ) else {
        return Ok(None);
    };

    let value = sheet.value(&antecedent)?;
    debug!(
        cell = %antecedent,
        %value,
        expected = %rule.equals,
        target = %rule.set,
        "conditionally setting cell value"
    );
    if !rule.matches(&value) {
        return Ok(None);
    }

    debug!(cell = %consequent, "forcing {} to {:?}", rule.then, rule.set);
    sheet.set_value(&consequent, CellValue::from_input(&rule.set))?;
    Ok(Some(consequent))
}
