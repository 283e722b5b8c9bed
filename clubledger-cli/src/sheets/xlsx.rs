//! `.xlsx` workbook store

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{Data, ExcelDateTime, Range, Reader, Xlsx, open_workbook};
use chrono::NaiveTime;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::{SheetSelector, SheetStore, missing_sheet};
use crate::table::{Grid, Value};

/// Number formats for date cells carried through a rewrite
const DATE_FORMAT: &str = "m/d/yyyy";
const DATETIME_FORMAT: &str = "m/d/yyyy h:mm";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// Sheets of a single `.xlsx` file
///
/// Replacing a sheet rewrites the whole file; other sheets keep their values,
/// cell types and order but lose formatting.
#[derive(Debug, Clone)]
pub struct XlsxStore {
    path: PathBuf,
}

/// A sheet as carried through a workbook rewrite
enum SheetContents {
    /// Cells as read, written back with their types
    Kept(Vec<Vec<Data>>),
    Replaced(Grid),
}

impl XlsxStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn open(&self) -> Result<Xlsx<std::io::BufReader<std::fs::File>>> {
        open_workbook(&self.path)
            .with_context(|| format!("Failed to open Excel file: {}", self.path.display()))
    }

    fn read_range(&self, sheet: &SheetSelector) -> Result<Range<Data>> {
        let mut workbook = self.open()?;
        let titles = workbook.sheet_names();
        let title = sheet
            .resolve(&titles)
            .ok_or_else(|| missing_sheet(sheet, &titles, &self.location()))?
            .to_string();

        workbook
            .worksheet_range(&title)
            .with_context(|| format!("Failed to read sheet: {}", title))
    }

    /// Every sheet's cells, in workbook order
    fn read_all(&self) -> Result<Vec<(String, SheetContents)>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut workbook = self.open()?;
        let mut sheets = Vec::new();
        for title in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&title)
                .with_context(|| format!("Failed to read sheet: {}", title))?;
            sheets.push((title, SheetContents::Kept(anchored_rows(&range))));
        }
        Ok(sheets)
    }
}

impl SheetStore for XlsxStore {
    fn sheet_titles(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Ok(self.open()?.sheet_names())
    }

    fn read_grid(&mut self, sheet: &SheetSelector) -> Result<Vec<Vec<String>>> {
        let range = self.read_range(sheet)?;
        Ok(anchored_rows(&range)
            .into_iter()
            .map(|row| row.iter().map(cell_to_text).collect())
            .collect())
    }

    fn replace_grid(&mut self, sheet: &SheetSelector, grid: &Grid) -> Result<()> {
        let mut sheets = self.read_all()?;
        let titles: Vec<String> = sheets.iter().map(|(t, _)| t.clone()).collect();

        let title = sheet
            .write_target(&titles)
            .ok_or_else(|| missing_sheet(sheet, &titles, &self.location()))?;

        match sheets.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => *existing = SheetContents::Replaced(grid.clone()),
            None => sheets.push((title.clone(), SheetContents::Replaced(grid.clone()))),
        }

        let mut workbook = Workbook::new();
        for (name, contents) in &sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(name)
                .with_context(|| format!("Invalid sheet name: {}", name))?;
            match contents {
                SheetContents::Kept(rows) => write_cells(worksheet, rows)?,
                SheetContents::Replaced(values) => write_grid(worksheet, values)?,
            }
        }

        workbook
            .save(&self.path)
            .with_context(|| format!("Failed to save Excel file: {}", self.path.display()))?;

        log::info!(
            "Wrote {} rows to sheet '{}' in {}",
            grid.len(),
            title,
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        format!("workbook {}", self.path.display())
    }
}

/// Rows of `range` positioned from cell A1
///
/// calamine ranges start at the first used cell; leading empty rows and
/// columns are restored so the header stays on the sheet's first row.
fn anchored_rows(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<Data>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![Data::Empty; start_col as usize];
        cells.extend(row.iter().cloned());
        rows.push(cells);
    }
    rows
}

fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => date_text(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Dates as `3/1`, with the time appended when there is one
fn date_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(datetime) if !dt.is_duration() => {
            if datetime.time() == NaiveTime::MIN {
                datetime.format("%-m/%-d").to_string()
            } else {
                datetime.format("%-m/%-d %H:%M").to_string()
            }
        }
        _ => dt.as_f64().to_string(),
    }
}

fn position(row_idx: usize, col_idx: usize) -> Result<(u32, u16)> {
    let row = u32::try_from(row_idx).context("Too many rows for a worksheet")?;
    let col = u16::try_from(col_idx).context("Too many columns for a worksheet")?;
    Ok((row, col))
}

fn write_grid(ws: &mut Worksheet, grid: &Grid) -> Result<()> {
    for (row_idx, row) in grid.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (row_num, col_num) = position(row_idx, col_idx)?;
            match value {
                Value::Null => {}
                Value::String(s) => {
                    ws.write_string(row_num, col_num, s)?;
                }
                Value::Int(i) => {
                    ws.write_number(row_num, col_num, *i as f64)?;
                }
                Value::Float(f) => {
                    ws.write_number(row_num, col_num, *f)?;
                }
            }
        }
    }
    Ok(())
}

/// Write cells read from another sheet, keeping numbers, booleans and dates typed
fn write_cells(ws: &mut Worksheet, rows: &[Vec<Data>]) -> Result<()> {
    let date = Format::new().set_num_format(DATE_FORMAT);
    let datetime = Format::new().set_num_format(DATETIME_FORMAT);
    let duration = Format::new().set_num_format(DURATION_FORMAT);

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_num, col_num) = position(row_idx, col_idx)?;
            match cell {
                Data::Empty | Data::Error(_) => {}
                Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                    ws.write_string(row_num, col_num, s)?;
                }
                Data::Int(i) => {
                    ws.write_number(row_num, col_num, *i as f64)?;
                }
                Data::Float(f) => {
                    ws.write_number(row_num, col_num, *f)?;
                }
                Data::Bool(b) => {
                    ws.write_boolean(row_num, col_num, *b)?;
                }
                Data::DateTime(dt) => {
                    let serial = dt.as_f64();
                    let format = if dt.is_duration() {
                        &duration
                    } else if serial.fract() == 0.0 {
                        &date
                    } else {
                        &datetime
                    };
                    ws.write_number_with_format(row_num, col_num, serial, format)?;
                }
            }
        }
    }
    Ok(())
}
