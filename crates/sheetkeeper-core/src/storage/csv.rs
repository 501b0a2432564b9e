//! CSV import/export functionality

use crate::document::Document;
use crate::error::Result;
use sheetkeeper_engine::engine::{Cell, CellRef, CellValue, parse_timestamp};
use std::io::Write;
use std::path::Path;

/// Parse a CSV file into cells. The first field of the first line lands in A1.
pub fn parse_csv(path: &Path) -> Result<Vec<(CellRef, Cell)>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_csv_content(&content))
}

pub(crate) fn parse_csv_content(content: &str) -> Vec<(CellRef, Cell)> {
    let mut cells = Vec::new();

    for (row_idx, line) in content.lines().enumerate() {
        for (col_idx, field) in parse_csv_line(line).into_iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            let cell_ref = CellRef::new(row_idx + 1, col_idx + 1);
            cells.push((cell_ref, Cell::new(parse_csv_field(&field))));
        }
    }

    cells
}

/// Parse a single CSV line, handling quoted fields
pub(crate) fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    field_was_quoted = true;
                }
                ',' => {
                    let field = std::mem::take(&mut current);
                    fields.push(if field_was_quoted {
                        field
                    } else {
                        field.trim().to_string()
                    });
                    field_was_quoted = false;
                }
                _ => current.push(c),
            }
        }
    }
    fields.push(if field_was_quoted {
        current
    } else {
        current.trim().to_string()
    });
    fields
}

/// Parse a CSV field into a value
/// - Timestamp in a supported date format -> Timestamp
/// - Valid number -> Number (unless it has leading zeros like "007")
/// - Otherwise -> Text
pub(crate) fn parse_csv_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }

    // Keep explicit surrounding whitespace (typically from quoted CSV fields).
    let trimmed = field.trim();
    if field != trimmed {
        return CellValue::Text(field.to_string());
    }

    if let Some(ts) = parse_timestamp(trimmed) {
        return CellValue::Timestamp(ts);
    }

    // Preserve strings that look like numbers but have leading zeros (e.g., "007", "00123")
    // unless they're just "0" or start with "0."
    if trimmed.starts_with('0')
        && trimmed.len() > 1
        && !trimmed.starts_with("0.")
        && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
    {
        return CellValue::Text(trimmed.to_string());
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return CellValue::Number(n);
    }

    CellValue::Text(trimmed.to_string())
}

/// Export the used range to CSV using display values. Backgrounds are not exported.
pub fn write_csv(path: &Path, doc: &Document) -> Result<()> {
    let mut file = std::fs::File::create(path)?;

    let Some((max_row, max_col)) = doc.used_extent() else {
        return Ok(());
    };

    for row in 1..=max_row {
        let row_fields: Vec<String> = (1..=max_col)
            .map(|col| escape_csv_field(&doc.get_cell_display(&CellRef::new(row, col))))
            .collect();
        writeln!(file, "{}", row_fields.join(","))?;
    }

    Ok(())
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    // Guard against CSV formula injection in spreadsheet apps.
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let safe_field = if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    };

    if safe_field.contains(',')
        || safe_field.contains('"')
        || safe_field.contains('\n')
        || safe_field.contains('\r')
    {
        format!("\"{}\"", safe_field.replace('"', "\"\""))
    } else {
        safe_field
    }
}
