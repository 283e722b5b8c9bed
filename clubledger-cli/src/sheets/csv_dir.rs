//! Directory-of-CSV store: sheet `T` is the file `T.csv`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};

use super::{SheetSelector, SheetStore, missing_sheet};
use crate::table::Grid;

#[derive(Debug, Clone)]
pub struct CsvDirStore {
    dir: PathBuf,
}

impl CsvDirStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn sheet_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", title))
    }
}

impl SheetStore for CsvDirStore {
    /// `.csv` file stems, sorted by name
    fn sheet_titles(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut titles = Vec::new();
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list directory: {}", self.dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                titles.push(stem.to_string());
            }
        }
        titles.sort();
        Ok(titles)
    }

    fn read_grid(&mut self, sheet: &SheetSelector) -> Result<Vec<Vec<String>>> {
        let titles = self.sheet_titles()?;
        let title = sheet
            .resolve(&titles)
            .ok_or_else(|| missing_sheet(sheet, &titles, &self.location()))?;
        let path = self.sheet_path(title);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut grid = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
            grid.push(record.iter().map(str::to_string).collect());
        }
        Ok(grid)
    }

    fn replace_grid(&mut self, sheet: &SheetSelector, grid: &Grid) -> Result<()> {
        let titles = self.sheet_titles()?;
        let title = sheet
            .write_target(&titles)
            .ok_or_else(|| missing_sheet(sheet, &titles, &self.location()))?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
        let path = self.sheet_path(&title);

        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        for row in grid {
            writer
                .write_record(row.iter().map(|v| v.to_string()))
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        writer.flush().context("Failed to flush CSV writer")?;

        log::info!("Wrote {} rows to {}", grid.len(), path.display());
        Ok(())
    }

    fn location(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}
