//! Cell data structures for the sheet grid.
//!
//! - [`CellValue`] - What a cell holds (empty, text, number or timestamp)
//! - [`Cell`] - A value plus an optional background colour
//! - [`Grid`] - Thread-safe sparse storage for cells (backed by `DashMap`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::cell_ref::CellRef;
use super::color::Rgb;

/// The value stored in a cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Parse user input into a value.
    /// - Empty string or whitespace -> Empty
    /// - `@` followed by a timestamp -> Timestamp
    /// - Quoted string -> Text (without quotes)
    /// - Valid number -> Number
    /// - Otherwise -> Text
    pub fn from_input(input: &str) -> CellValue {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if let Some(ts) = trimmed.strip_prefix('@').and_then(parse_timestamp) {
            return CellValue::Timestamp(ts);
        }

        if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
            return CellValue::Text(trimmed[1..trimmed.len() - 1].to_string());
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return CellValue::Number(n);
        }

        CellValue::Text(trimmed.to_string())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Interpret the value as a point in time.
    /// Text is accepted when it parses as one of the supported date formats.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Timestamp(ts) => Some(*ts),
            CellValue::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Timestamp(ts) => f.write_str(&format_timestamp(ts)),
        }
    }
}

/// Parse a timestamp. Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` (all but the first are read as UTC).
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// A cell in the sheet grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub background: Option<Rgb>,
}

impl Cell {
    pub fn new(value: CellValue) -> Cell {
        Cell {
            value,
            background: None,
        }
    }

    pub fn new_text(text: &str) -> Cell {
        Cell::new(CellValue::Text(text.to_string()))
    }

    pub fn new_number(n: f64) -> Cell {
        Cell::new(CellValue::Number(n))
    }

    pub fn new_timestamp(ts: DateTime<Utc>) -> Cell {
        Cell::new(CellValue::Timestamp(ts))
    }

    /// A cell with neither a value nor a background carries no information.
    pub fn is_vacant(&self) -> bool {
        self.value.is_blank() && self.background.is_none()
    }
}

/// Thread-safe sparse grid storage (DashMap is internally sharded, the Arc makes clones cheap).
pub type Grid = Arc<DashMap<CellRef, Cell>>;

pub fn new_grid() -> Grid {
    Arc::new(DashMap::new())
}
