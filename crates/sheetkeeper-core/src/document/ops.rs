use chrono::{DateTime, Utc};
use sheetkeeper_engine::engine::{Cell, CellRef, CellValue, Rgb};

use super::Document;
use crate::accessor::CellAccessor;
use crate::automation::{EditEvent, EditOutcome, on_edit};
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};

impl CellAccessor for Document {
    fn in_bounds(&self, cell: &CellRef) -> bool {
        (1..=self.max_rows).contains(&cell.row) && (1..=self.max_cols).contains(&cell.col)
    }

    fn value(&self, cell: &CellRef) -> Result<CellValue> {
        if !self.in_bounds(cell) {
            return Err(SheetError::OutOfBounds(cell.clone()));
        }
        Ok(self
            .grid
            .get(cell)
            .map(|c| c.value.clone())
            .unwrap_or_default())
    }

    fn set_value(&mut self, cell: &CellRef, value: CellValue) -> Result<()> {
        if !self.in_bounds(cell) {
            return Err(SheetError::OutOfBounds(cell.clone()));
        }
        let vacant = {
            let mut entry = self.grid.entry(cell.clone()).or_default();
            entry.value = value;
            entry.is_vacant()
        };
        if vacant {
            self.grid.remove(cell);
        }
        self.modified = true;
        Ok(())
    }

    fn background(&self, cell: &CellRef) -> Result<Option<Rgb>> {
        if !self.in_bounds(cell) {
            return Err(SheetError::OutOfBounds(cell.clone()));
        }
        Ok(self.grid.get(cell).and_then(|c| c.background))
    }

    fn set_background(&mut self, cell: &CellRef, color: Rgb) -> Result<()> {
        if !self.in_bounds(cell) {
            return Err(SheetError::OutOfBounds(cell.clone()));
        }
        self.grid.entry(cell.clone()).or_default().background = Some(color);
        self.modified = true;
        Ok(())
    }

    fn row_count(&self) -> usize {
        self.grid
            .iter()
            .filter(|entry| !entry.value().value.is_blank())
            .map(|entry| entry.key().row)
            .max()
            .unwrap_or(0)
    }

    fn max_row_count(&self) -> usize {
        self.max_rows
    }
}

impl Document {
    /// Set cell contents from input string.
    pub fn set_cell_from_input(&mut self, cell_ref: CellRef, input: &str) -> Result<()> {
        self.set_value(&cell_ref, CellValue::from_input(input))
    }

    /// Apply a user edit: write the value, then run the edit trigger for that cell.
    pub fn edit_cell(
        &mut self,
        cell_ref: CellRef,
        input: &str,
        config: &SheetConfig,
        now: DateTime<Utc>,
    ) -> Result<EditOutcome> {
        self.set_cell_from_input(cell_ref.clone(), input)?;
        on_edit(self, config, &EditEvent::new(cell_ref), now)
    }

    /// Get the display string for a cell (empty for blank or missing cells).
    pub fn get_cell_display(&self, cell_ref: &CellRef) -> String {
        self.grid
            .get(cell_ref)
            .map(|c| c.value.to_string())
            .unwrap_or_default()
    }

    /// Bounding box of every stored cell as `(last_row, last_col)`.
    pub fn used_extent(&self) -> Option<(usize, usize)> {
        self.grid.iter().fold(None, |acc, entry| {
            let key = entry.key();
            Some(match acc {
                None => (key.row, key.col),
                Some((r, c)) => (r.max(key.row), c.max(key.col)),
            })
        })
    }

    /// Plain text table of the used range. Backgrounds are appended as `[#RRGGBB]`.
    pub fn render_table(&self) -> String {
        let Some((last_row, last_col)) = self.used_extent() else {
            return String::new();
        };

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(last_row + 1);
        let mut header = vec![String::new()];
        header.extend((1..=last_col).map(CellRef::col_to_letters));
        rows.push(header);

        for row in 1..=last_row {
            let mut line = vec![row.to_string()];
            for col in 1..=last_col {
                let cell = self.grid.get(&CellRef::new(row, col)).map(|c| c.clone());
                line.push(render_cell(cell.as_ref()));
            }
            rows.push(line);
        }

        let mut widths = vec![0usize; last_col + 1];
        for line in &rows {
            for (i, field) in line.iter().enumerate() {
                widths[i] = widths[i].max(field.chars().count());
            }
        }

        let mut out = String::new();
        for line in rows {
            let fields: Vec<String> = line
                .iter()
                .enumerate()
                .map(|(i, field)| format!("{:<width$}", field, width = widths[i]))
                .collect();
            out.push_str(fields.join(" | ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn render_cell(cell: Option<&Cell>) -> String {
    match cell {
        None => String::new(),
        Some(cell) => match cell.background {
            Some(bg) if cell.value.is_blank() => format!("[{}]", bg),
            Some(bg) => format!("{} [{}]", cell.value, bg),
            None => cell.value.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_back() {
        let mut doc = Document::new();
        let c3 = CellRef::new(3, 3);
        doc.set_cell_from_input(c3.clone(), "Completed").unwrap();
        assert_eq!(doc.value(&c3).unwrap(), CellValue::Text("Completed".into()));
        assert!(!doc.is_blank(&c3).unwrap());
        assert!(doc.is_blank(&CellRef::new(3, 4)).unwrap());
        assert!(doc.modified);
    }

    #[test]
    fn test_out_of_bounds_access_is_an_error() {
        let mut doc = Document::with_limits(5, 5);
        let outside = CellRef::new(6, 1);
        assert!(matches!(doc.value(&outside), Err(SheetError::OutOfBounds(_))));
        assert!(matches!(
            doc.set_background(&outside, Rgb::BLACK),
            Err(SheetError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_clearing_value_keeps_background() {
        let mut doc = Document::new();
        let i2 = CellRef::new(2, 9);
        doc.set_cell_from_input(i2.clone(), "@2026-10-18T00:00:00Z").unwrap();
        doc.set_background(&i2, Rgb::BLACK).unwrap();
        doc.set_cell_from_input(i2.clone(), "").unwrap();
        assert_eq!(doc.background(&i2).unwrap(), Some(Rgb::BLACK));
        assert!(doc.is_blank(&i2).unwrap());
    }

    #[test]
    fn test_clearing_plain_cell_removes_entry() {
        let mut doc = Document::new();
        let a2 = CellRef::new(2, 1);
        doc.set_cell_from_input(a2.clone(), "x").unwrap();
        doc.set_cell_from_input(a2.clone(), "").unwrap();
        assert!(!doc.grid.contains_key(&a2));
    }

    #[test]
    fn test_row_count_ignores_background_only_cells() {
        let mut doc = Document::new();
        assert_eq!(doc.row_count(), 0);
        doc.set_cell_from_input(CellRef::new(4, 2), "x").unwrap();
        doc.set_background(&CellRef::new(9, 9), Rgb::WHITE).unwrap();
        assert_eq!(doc.row_count(), 4);
        assert_eq!(doc.max_row_count(), 1000);
    }

    #[test]
    fn test_render_table() {
        let mut doc = Document::new();
        doc.set_cell_from_input(CellRef::new(1, 1), "Task").unwrap();
        doc.set_cell_from_input(CellRef::new(2, 1), "Ship").unwrap();
        doc.set_background(&CellRef::new(2, 2), Rgb::BLACK).unwrap();
        let table = doc.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains('A') && lines[0].contains('B'));
        assert!(lines[1].starts_with("1 | Task"));
        assert!(lines[2].contains("[#000000]"));
    }
}
