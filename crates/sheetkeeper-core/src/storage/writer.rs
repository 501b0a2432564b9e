//! Writer for .grd file format

use super::parser::BACKGROUND_SUFFIX;
use crate::error::Result;
use sheetkeeper_engine::engine::{CellValue, Grid, format_timestamp};
use std::fs;
use std::path::Path;

/// Write a Grid to a .grd file
pub fn write_grd(path: &Path, grid: &Grid) -> Result<()> {
    let content = write_grd_content(grid);
    fs::write(path, content)?;
    Ok(())
}

/// Write a Grid to a .grd format string
pub fn write_grd_content(grid: &Grid) -> String {
    let mut lines = vec!["# Sheetkeeper Sheet".to_string()];

    // Collect and sort cells by position for consistent output
    let mut cells: Vec<_> = grid
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect();
    cells.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (cell_ref, cell) in cells {
        let value_str = match &cell.value {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => Some(format!("\"{}\"", escape_grd_text(s))),
            CellValue::Timestamp(ts) => Some(format!("@{}", format_timestamp(ts))),
        };

        if let Some(value_str) = value_str {
            lines.push(format!("{}: {}", cell_ref, value_str));
        }
        if let Some(bg) = cell.background {
            lines.push(format!("{}{}: {}", cell_ref, BACKGROUND_SUFFIX, bg));
        }
    }

    lines.join("\n") + "\n"
}

fn escape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
