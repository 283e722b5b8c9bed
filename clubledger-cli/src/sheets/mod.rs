//! Spreadsheet access
//!
//! A [`SheetStore`] is the session handle through which pipelines read input
//! grids and replace output sheets. Stores are opened once per run and passed
//! explicitly to each pipeline.

mod csv_dir;
#[cfg(test)]
mod memory;
mod xlsx;

use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::table::Grid;

pub use csv_dir::CsvDirStore;
#[cfg(test)]
pub use memory::MemoryStore;
pub use xlsx::XlsxStore;

/// Selects a sheet by title or by zero-based position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetSelector {
    Index(usize),
    Title(String),
}

impl SheetSelector {
    /// Resolve against the store's sheet titles, in order
    pub fn resolve<'a>(&self, titles: &'a [String]) -> Option<&'a str> {
        match self {
            SheetSelector::Index(idx) => titles.get(*idx).map(String::as_str),
            SheetSelector::Title(title) => titles
                .iter()
                .find(|t| *t == title)
                .map(String::as_str),
        }
    }

    /// Title to replace: an existing match, or a new sheet when selected by title
    pub fn write_target(&self, titles: &[String]) -> Option<String> {
        match (self.resolve(titles), self) {
            (Some(title), _) => Some(title.to_string()),
            (None, SheetSelector::Title(title)) => Some(title.clone()),
            (None, SheetSelector::Index(_)) => None,
        }
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Index(idx) => write!(f, "sheet #{}", idx),
            SheetSelector::Title(title) => write!(f, "sheet '{}'", title),
        }
    }
}

impl From<&str> for SheetSelector {
    fn from(title: &str) -> Self {
        SheetSelector::Title(title.to_string())
    }
}

/// Read and replace sheets of one workbook
pub trait SheetStore {
    /// Sheet titles, in workbook order
    fn sheet_titles(&self) -> Result<Vec<String>>;

    /// Read a sheet as a text grid, header row first
    fn read_grid(&mut self, sheet: &SheetSelector) -> Result<Vec<Vec<String>>>;

    /// Replace a sheet's contents with `grid`, starting at the top-left cell
    ///
    /// A sheet selected by title is created when missing.
    fn replace_grid(&mut self, sheet: &SheetSelector, grid: &Grid) -> Result<()>;

    /// Human-readable location for logs
    fn location(&self) -> String;
}

/// Open the store for `path`: `.xlsx`/`.xlsm` files are workbooks, anything
/// else is a directory of CSV sheets
pub fn open_store(path: &Path) -> Result<Box<dyn SheetStore>> {
    let is_workbook = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xlsm"));

    let store: Box<dyn SheetStore> = if is_workbook {
        Box::new(XlsxStore::new(path))
    } else {
        Box::new(CsvDirStore::new(path))
    };
    log::debug!("Opened {}", store.location());
    Ok(store)
}

/// Error for a selector that matches no sheet
pub(crate) fn missing_sheet(sheet: &SheetSelector, titles: &[String], location: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "{} not found in {} (sheets: [{}])",
        sheet,
        location,
        titles.join(", ")
    )
}
