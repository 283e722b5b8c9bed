//! Attendance and dues reconciliation for a club whose records live in a
//! shared spreadsheet.
//!
//! Two batch pipelines share the [`table`] loader:
//! - [`attendance`]: sign-in sheets to per-member practice counts and a presence matrix
//! - [`dues`]: payments, trips and attendance joined into a priced ledger
//!
//! Sheets are read and replaced through a [`sheets::SheetStore`] handle.

pub mod attendance;
pub mod cli;
pub mod columns;
pub mod config;
pub mod dues;
pub mod names;
pub mod output;
pub mod pipeline;
pub mod sheets;
pub mod table;
