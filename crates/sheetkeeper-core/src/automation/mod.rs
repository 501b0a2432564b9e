//! Sheet automation: the edit trigger and the two manual sweeps.
//!
//! Every entry point works against any [`crate::CellAccessor`] and takes the
//! current time explicitly.

mod colorizer;
mod consistency;
mod defaults;
mod report;
mod trigger;

pub use colorizer::{recolor_all_timestamps, recolor_cell, stamp_last_modified};
pub use consistency::apply_consistency_rule;
pub use defaults::{fill_default_priorities, fill_priorities_with};
pub use report::{RowFailure, SweepReport};
pub use trigger::{EditEvent, EditOutcome, on_edit};
