//! Loading raw text grids into tables

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Cell, TableError};

/// Canonical name for the sign-in sheet's attendee column
pub const ATTENDEES: &str = "Attendees";

/// Long-form attendee header, e.g. "Attendees\nEnter as a list separated by line returns"
static ATTENDEES_LONG_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Attendees\s*[\r\n]").expect("valid attendee header pattern"));

/// A loaded table: header plus rows of cells
///
/// Every row holds exactly `headers.len()` cells, and no row or column is
/// absent in every cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Headers removed because every cell beneath them was empty
    pub dropped_headers: Vec<String>,
}

/// Resolved column reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Index into each row
    Index(usize),
    /// Header existed but had no values; reads as absent
    Empty,
}

impl RawTable {
    /// Build a table from a text grid whose first row is the header
    ///
    /// A grid without a header row gives an empty table.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut lines = grid.into_iter();
        let headers: Vec<String> = match lines.next() {
            Some(header) => header.iter().map(|h| canonical_header(h)).collect(),
            None => return RawTable::default(),
        };

        let width = headers.len();
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (row_idx, line) in lines.enumerate() {
            if line.len() > width && line[width..].iter().any(|c| !c.is_empty()) {
                log::debug!(
                    "Row {} has {} cells beyond the header; ignoring them",
                    row_idx + 2,
                    line.len() - width
                );
            }
            let mut row: Vec<Cell> = line.iter().take(width).map(|c| Cell::from_raw(c)).collect();
            row.resize(width, Cell::Absent);
            rows.push(row);
        }

        let mut table = RawTable {
            headers,
            rows,
            dropped_headers: Vec::new(),
        };
        table.drop_empty_columns();
        table.drop_empty_rows();
        table
    }

    fn drop_empty_columns(&mut self) {
        let keep: Vec<bool> = (0..self.headers.len())
            .map(|col| self.rows.iter().any(|row| !row[col].is_absent()))
            .collect();

        if keep.iter().all(|k| *k) {
            return;
        }

        let headers = std::mem::take(&mut self.headers);
        for (header, kept) in headers.into_iter().zip(&keep) {
            if *kept {
                self.headers.push(header);
            } else {
                log::debug!("Dropping empty column '{}'", header.escape_debug());
                self.dropped_headers.push(header);
            }
        }

        for row in &mut self.rows {
            let cells = std::mem::take(row);
            *row = cells
                .into_iter()
                .zip(&keep)
                .filter_map(|(cell, kept)| kept.then_some(cell))
                .collect();
        }
    }

    fn drop_empty_rows(&mut self) {
        let before = self.rows.len();
        self.rows.retain(|row| row.iter().any(|c| !c.is_absent()));
        if self.rows.len() < before {
            log::debug!("Dropped {} empty rows", before - self.rows.len());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Resolve a column by header name
    pub fn column(&self, name: &str) -> Result<Column, TableError> {
        if let Some(idx) = self.headers.iter().position(|h| h == name) {
            return Ok(Column::Index(idx));
        }
        if self.dropped_headers.iter().any(|h| h == name) {
            return Ok(Column::Empty);
        }
        Err(TableError::UnknownHeader {
            column: name.to_string(),
            available: self.headers.clone(),
        })
    }

    /// Cell of `row` in `column`
    pub fn cell<'a>(&'a self, row: &'a [Cell], column: Column) -> &'a Cell {
        static ABSENT: Cell = Cell::Absent;
        match column {
            Column::Index(idx) => row.get(idx).unwrap_or(&ABSENT),
            Column::Empty => &ABSENT,
        }
    }
}

/// Trim a header and collapse the long-form attendee header to its short name
fn canonical_header(raw: &str) -> String {
    if ATTENDEES_LONG_FORM.is_match(raw) {
        return ATTENDEES.to_string();
    }
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_missing_header_gives_empty_table() {
        let table = RawTable::from_grid(Vec::new());
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_drops_empty_rows_and_columns() {
        let table = RawTable::from_grid(grid(&[
            &["First-Name", "Notes", "Last-Name"],
            &["Ada", "", "Lovelace"],
            &["", "", ""],
            &["Alan", "", "Turing"],
        ]));

        assert_eq!(table.headers, vec!["First-Name", "Last-Name"]);
        assert_eq!(table.dropped_headers, vec!["Notes"]);
        assert_eq!(table.len(), 2);
        for row in &table.rows {
            assert_eq!(row.len(), table.headers.len());
            assert!(row.iter().any(|c| !c.is_absent()));
        }
        for col in 0..table.headers.len() {
            assert!(table.rows.iter().any(|r| !r[col].is_absent()));
        }
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = RawTable::from_grid(grid(&[&["A", "B"], &["x"], &["", "y", "extra"]]));
        assert_eq!(table.rows[0], vec![Cell::Text("x".into()), Cell::Absent]);
        assert_eq!(table.rows[1], vec![Cell::Absent, Cell::Text("y".into())]);
    }

    #[test]
    fn test_long_attendee_header_is_renamed() {
        let table = RawTable::from_grid(grid(&[
            &["Date", "Attendees\nEnter as a list separated by line returns (no bullet points)"],
            &["3/1", "Alice\nBob"],
        ]));
        assert_eq!(table.headers, vec!["Date", ATTENDEES]);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let table = RawTable::from_grid(grid(&[&[" Amount-Paid "], &["$10"]]));
        assert_eq!(table.headers, vec!["Amount-Paid"]);
    }

    #[test]
    fn test_column_lookup() {
        let table = RawTable::from_grid(grid(&[
            &["Full-Name", "Third Trip"],
            &["ada lovelace", ""],
        ]));

        assert_eq!(table.column("Full-Name").unwrap(), Column::Index(0));
        assert_eq!(table.column("Third Trip").unwrap(), Column::Empty);
        assert!(matches!(
            table.column("Owed"),
            Err(TableError::UnknownHeader { .. })
        ));

        let row = &table.rows[0];
        assert_eq!(table.cell(row, Column::Empty), &Cell::Absent);
        assert_eq!(
            table.cell(row, Column::Index(0)).as_text(),
            Some("ada lovelace")
        );
    }
}
