//! Attendance aggregation from sign-in sheets
//!
//! Each sign-in column is one event; each cell lists attendees one per line.
//! Produces a per-member count summary and a presence matrix.

mod aggregate;
mod report;

pub use aggregate::{AttendanceRecord, EventId};
pub use report::{AttendanceSummary, PresenceMatrix, SummaryEntry};
