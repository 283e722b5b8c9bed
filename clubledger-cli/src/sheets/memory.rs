//! In-memory store for pipeline tests

use anyhow::Result;

use super::{SheetSelector, SheetStore, missing_sheet};
use crate::table::Grid;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryStore {
    pub fn with_sheet(mut self, title: &str, rows: &[&[&str]]) -> Self {
        let grid = rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        self.sheets.push((title.to_string(), grid));
        self
    }

    pub fn sheet(&self, title: &str) -> Option<&Vec<Vec<String>>> {
        self.sheets.iter().find(|(t, _)| t == title).map(|(_, g)| g)
    }
}

impl SheetStore for MemoryStore {
    fn sheet_titles(&self) -> Result<Vec<String>> {
        Ok(self.sheets.iter().map(|(t, _)| t.clone()).collect())
    }

    fn read_grid(&mut self, sheet: &SheetSelector) -> Result<Vec<Vec<String>>> {
        let titles = self.sheet_titles()?;
        let title = sheet
            .resolve(&titles)
            .ok_or_else(|| missing_sheet(sheet, &titles, &self.location()))?;
        Ok(self.sheet(title).cloned().unwrap_or_default())
    }

    fn replace_grid(&mut self, sheet: &SheetSelector, grid: &Grid) -> Result<()> {
        let titles = self.sheet_titles()?;
        let title = sheet
            .write_target(&titles)
            .ok_or_else(|| missing_sheet(sheet, &titles, &self.location()))?;
        let text: Vec<Vec<String>> = grid
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        match self.sheets.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => *existing = text,
            None => self.sheets.push((title, text)),
        }
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
