//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "C3", "AA100") and 1-based row/column coordinates, matching the
//! numbering a spreadsheet user sees (row 1 is the header row, column A is 1).
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("C3").unwrap();
//! assert_eq!(cell.col, 3);
//! assert_eq!(cell.row, 3);
//! assert_eq!(cell.to_string(), "C3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a single grid position by row and column (both 1-based).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("static A1 pattern")
    })
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "I2", "AA10").
    /// Returns None if the input is invalid or names row 0.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_pattern().captures(name.trim())?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col = col.checked_mul(26)?.checked_add(digit)?;
        }

        let row = numbers.parse::<usize>().ok()?;
        if row == 0 {
            return None;
        }

        Some(CellRef::new(row, col))
    }

    /// Convert a 1-based column index to letters (1 -> A, 26 -> Z, 27 -> AA).
    /// Column 0 has no letter form and renders as an empty string.
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// The cell in the same row at another column.
    pub fn with_col(&self, col: usize) -> CellRef {
        CellRef::new(self.row, col)
    }

    /// Header row check.
    pub fn is_header(&self) -> bool {
        self.row <= 1
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row)
    }
}
