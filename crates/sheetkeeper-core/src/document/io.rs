use super::Document;
use crate::error::{Result, SheetError};
use crate::storage::{parse_csv, parse_grd, write_csv, write_grd};
use sheetkeeper_engine::engine::{CellRef, Grid, new_grid};
use std::path::{Path, PathBuf};

/// On-disk formats, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Grd,
    Csv,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<FileFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("grd") => Ok(FileFormat::Grd),
            Some("csv") => Ok(FileFormat::Csv),
            _ => Err(SheetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl Document {
    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(SheetError::NoFilePath);
        };
        self.save_as(&path)?;
        Ok(path)
    }

    /// Write the document to `path` without changing the current file path.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        match FileFormat::from_path(path)? {
            FileFormat::Grd => write_grd(path, &self.grid)?,
            FileFormat::Csv => write_csv(path, self)?,
        }
        if self.file_path.as_deref() == Some(path) {
            self.modified = false;
        }
        Ok(())
    }

    /// Load from file, replacing the whole grid.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let grid = match FileFormat::from_path(path)? {
            FileFormat::Grd => parse_grd(path)?,
            FileFormat::Csv => {
                let grid = new_grid();
                for (cell_ref, cell) in parse_csv(path)? {
                    grid.insert(cell_ref, cell);
                }
                grid
            }
        };

        self.replace_grid(grid);
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    fn replace_grid(&mut self, grid: Grid) {
        let refs: Vec<CellRef> = grid.iter().map(|entry| entry.key().clone()).collect();
        for cell_ref in &refs {
            self.grow_to_fit(cell_ref);
        }
        self.grid = grid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::CellAccessor;
    use sheetkeeper_engine::engine::{CellValue, Rgb};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.grd")).unwrap(), FileFormat::Grd);
        assert_eq!(FileFormat::from_path(Path::new("a.CSV")).unwrap(), FileFormat::Csv);
        assert!(matches!(
            FileFormat::from_path(Path::new("a.xlsx")),
            Err(SheetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_save_and_reload_grd() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.grd");

        let mut doc = Document::new();
        doc.file_path = Some(path.clone());
        doc.set_cell_from_input(CellRef::new(2, 3), "In Progress").unwrap();
        doc.set_cell_from_input(CellRef::new(2, 9), "@2026-10-18T09:00:00Z").unwrap();
        doc.set_background(&CellRef::new(2, 9), Rgb::BLACK).unwrap();
        doc.save_file().unwrap();
        assert!(!doc.modified);

        let loaded = Document::with_file(Some(path), &crate::SheetConfig::default()).unwrap();
        assert_eq!(
            loaded.value(&CellRef::new(2, 3)).unwrap(),
            CellValue::Text("In Progress".into())
        );
        assert!(matches!(
            loaded.value(&CellRef::new(2, 9)).unwrap(),
            CellValue::Timestamp(_)
        ));
        assert_eq!(loaded.background(&CellRef::new(2, 9)).unwrap(), Some(Rgb::BLACK));
    }

    #[test]
    fn test_missing_file_becomes_save_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.grd");
        let doc = Document::with_file(Some(path.clone()), &crate::SheetConfig::default()).unwrap();
        assert_eq!(doc.file_path, Some(path));
        assert!(doc.grid.is_empty());
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::new();
        assert!(matches!(doc.save_file(), Err(SheetError::NoFilePath)));
    }

    #[test]
    fn test_load_grows_grid_to_fit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.grd");
        std::fs::write(&path, "AD1500: \"far\"\n").unwrap();
        let mut doc = Document::with_limits(10, 10);
        doc.load_file(&path).unwrap();
        assert_eq!(doc.max_rows, 1500);
        assert_eq!(doc.max_cols, 30);
    }
}
