//! Sheet engine API.
//!
//! Pure, host-independent building blocks:
//!
//! - [`Cell`], [`CellValue`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`Rgb`] - Background colours
//! - [`color_for_age`] - Age-based background fade
//! - [`ColumnRoles`] - Role-to-column mapping and importance test
//! - [`consistency_rules`] - STATUS/PRIORITY implications

mod cell;
mod cell_ref;
mod color;
mod fade;
mod roles;
mod rules;

pub use cell::{Cell, CellValue, Grid, format_timestamp, new_grid, parse_timestamp};
pub use cell_ref::CellRef;
pub use color::{Channel, Rgb};
pub use fade::{ClampCeiling, FadeConfig, color_for_age, elapsed_metric};
pub use roles::{ColumnRoles, Role};
pub use rules::{Implication, consistency_rules, rule_for};
