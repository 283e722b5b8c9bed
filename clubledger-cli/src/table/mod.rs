//! Tabular data shared by both pipelines
//!
//! Raw sheet grids are loaded into [`RawTable`]s of [`Cell`]s; results are
//! written back as [`Grid`]s of [`Value`]s.

pub mod parse;
mod raw;
mod value;

pub use raw::{ATTENDEES, Column, RawTable};
pub use value::{Cell, Grid, Value};

/// Error resolving table structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An expected column is not in the sheet's header
    UnknownHeader {
        column: String,
        available: Vec<String>,
    },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::UnknownHeader { column, available } => {
                write!(
                    f,
                    "Missing column '{}' - sheet has [{}]",
                    column,
                    available.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for TableError {}
