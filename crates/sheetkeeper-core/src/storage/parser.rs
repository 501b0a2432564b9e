//! Parser for .grd file format

use crate::error::{Result, SheetError};
use sheetkeeper_engine::engine::{CellRef, CellValue, Grid, Rgb, new_grid, parse_timestamp};
use std::fs;
use std::path::Path;

/// Suffix on a cell reference that marks a background colour line.
pub(crate) const BACKGROUND_SUFFIX: &str = ".bg";

/// Parse a .grd file and return a Grid
pub fn parse_grd(path: &Path) -> Result<Grid> {
    let content = fs::read_to_string(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string
pub fn parse_grd_content(content: &str) -> Result<Grid> {
    let grid = new_grid();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse "CELLREF: VALUE" or "CELLREF.bg: #RRGGBB"
        let Some((key, value_str)) = line.split_once(':') else {
            return Err(SheetError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: VALUE' format".to_string(),
            });
        };

        let key = key.trim();
        let value_str = value_str.trim();
        let (cell_ref_str, is_background) = match key.strip_suffix(BACKGROUND_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (key, false),
        };

        let cell_ref = CellRef::from_str(cell_ref_str).ok_or_else(|| SheetError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        if is_background {
            let color = Rgb::from_hex(value_str).ok_or_else(|| SheetError::Parse {
                line: line_num + 1,
                message: format!("Invalid colour: {}. Use #RRGGBB.", value_str),
            })?;
            grid.entry(cell_ref).or_default().background = Some(color);
        } else {
            let value = parse_cell_value(value_str, line_num + 1)?;
            grid.entry(cell_ref).or_default().value = value;
        }
    }

    Ok(grid)
}

/// Parse a cell value string into a CellValue
fn parse_cell_value(value: &str, line_num: usize) -> Result<CellValue> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(CellValue::Empty);
    }

    // Timestamp: starts with '@'
    if let Some(ts) = value.strip_prefix('@') {
        return parse_timestamp(ts)
            .map(CellValue::Timestamp)
            .ok_or_else(|| SheetError::Parse {
                line: line_num,
                message: format!("Invalid timestamp: {}", ts),
            });
    }

    // Quoted string: starts and ends with '"'
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        let text = &value[1..value.len() - 1];
        return Ok(CellValue::Text(unescape_grd_text(text)));
    }

    // Try to parse as number
    if let Ok(n) = value.parse::<f64>() {
        return Ok(CellValue::Number(n));
    }

    Err(SheetError::Parse {
        line: line_num,
        message: format!("Invalid value: {}. Use quotes for text.", value),
    })
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn value_at(grid: &Grid, row: usize, col: usize) -> CellValue {
        grid.get(&CellRef::new(row, col)).unwrap().value.clone()
    }

    #[test]
    fn test_parse_number() {
        let grid = parse_grd_content("G2: 0").unwrap();
        assert_eq!(value_at(&grid, 2, 7), CellValue::Number(0.0));
    }

    #[test]
    fn test_parse_text_escaped_quotes() {
        let grid = parse_grd_content(r#"A2: "He said \"hi\"""#).unwrap();
        assert_eq!(value_at(&grid, 2, 1), CellValue::Text("He said \"hi\"".into()));
    }

    #[test]
    fn test_parse_timestamp() {
        let grid = parse_grd_content("I2: @2026-10-18T09:00:00Z").unwrap();
        assert_eq!(
            value_at(&grid, 2, 9),
            CellValue::Timestamp(Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_value_and_background_merge_into_one_cell() {
        let content = "I2: @2026-10-18T09:00:00Z\nI2.bg: #0A0A0A\nJ3.bg: #FFFFFF\n";
        let grid = parse_grd_content(content).unwrap();
        let i2 = grid.get(&CellRef::new(2, 9)).unwrap();
        assert!(matches!(i2.value, CellValue::Timestamp(_)));
        assert_eq!(i2.background, Some(Rgb::new(10, 10, 10)));
        let j3 = grid.get(&CellRef::new(3, 10)).unwrap();
        assert_eq!(j3.value, CellValue::Empty);
        assert_eq!(j3.background, Some(Rgb::WHITE));
    }

    #[test]
    fn test_skip_comments_and_empty_lines() {
        let content = r#"
# Project tracker
A1: "Title"

# Another comment

C1: "Status"
"#;
        let grid = parse_grd_content(content).unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_errors_report_line_numbers() {
        let err = parse_grd_content("A1: 1\nnot a cell\n").unwrap_err();
        assert!(matches!(err, SheetError::Parse { line: 2, .. }));

        let err = parse_grd_content("A1: bare words").unwrap_err();
        assert!(matches!(err, SheetError::Parse { line: 1, .. }));

        let err = parse_grd_content("\nI2: @later").unwrap_err();
        assert!(matches!(err, SheetError::Parse { line: 2, .. }));

        let err = parse_grd_content("I2.bg: white").unwrap_err();
        assert!(err.to_string().contains("Invalid colour"));
    }
}
