//! The two batch runs
//!
//! Both take their sheet stores as arguments; nothing is held between runs.

use anyhow::{Context, Result};

use crate::attendance::{AttendanceRecord, AttendanceSummary, PresenceMatrix};
use crate::config::{AttendanceConfig, DuesConfig};
use crate::dues::{self, Ledger};
use crate::sheets::{SheetSelector, SheetStore};
use crate::table::{Grid, RawTable};

/// Whether results are written back to the sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Write,
    DryRun,
}

/// Results of the attendance run
#[derive(Debug, Clone)]
pub struct AttendanceOutcome {
    pub record: AttendanceRecord,
    pub summary: AttendanceSummary,
    pub presence: PresenceMatrix,
}

impl AttendanceOutcome {
    /// The summary as the dues run would read it back
    pub fn summary_table(&self) -> RawTable {
        RawTable::from_grid(grid_to_text(&self.summary.to_grid()))
    }
}

/// Read a sheet through the table loader
pub fn load_table(store: &mut dyn SheetStore, sheet: &SheetSelector) -> Result<RawTable> {
    let grid = store
        .read_grid(sheet)
        .with_context(|| format!("Failed to read {} from {}", sheet, store.location()))?;
    let table = RawTable::from_grid(grid);
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        sheet
    );
    Ok(table)
}

/// Aggregate the sign-in sheet and replace the summary and presence sheets
pub fn run_attendance(
    store: &mut dyn SheetStore,
    config: &AttendanceConfig,
    mode: WriteMode,
) -> Result<AttendanceOutcome> {
    let raw = load_table(store, &config.raw_sheet)?;
    let record = AttendanceRecord::aggregate(&raw, &config.skip_columns);
    let summary = AttendanceSummary::from_record(&record);
    let presence = PresenceMatrix::from_record(&record);

    if mode == WriteMode::Write {
        store
            .replace_grid(&config.summary_sheet, &summary.to_grid())
            .with_context(|| format!("Failed to write attendance summary to {}", config.summary_sheet))?;
        store
            .replace_grid(&config.presence_sheet, &presence.to_grid())
            .with_context(|| format!("Failed to write presence matrix to {}", config.presence_sheet))?;
    }

    Ok(AttendanceOutcome {
        record,
        summary,
        presence,
    })
}

/// Reconcile Paid and Trips against `summary` and replace the ledger sheet
pub fn run_dues(
    store: &mut dyn SheetStore,
    summary: &RawTable,
    config: &DuesConfig,
    mode: WriteMode,
) -> Result<Ledger> {
    let paid = load_table(store, &config.paid_sheet)?;
    let trips = load_table(store, &config.trips_sheet)?;

    let ledger = dues::reconcile(&paid, &trips, summary, config.min_practices)
        .context("Failed to reconcile dues")?;

    let totals = ledger.totals();
    log::info!(
        "Reconciled {} members: {} owe {:.2} in total, {:.2} paid",
        totals.members,
        totals.owing,
        totals.owed,
        totals.paid
    );

    if mode == WriteMode::Write {
        store
            .replace_grid(&config.ledger_sheet, &ledger.to_grid())
            .with_context(|| format!("Failed to write ledger to {}", config.ledger_sheet))?;
    }

    Ok(ledger)
}

/// Render a grid as the text a sheet would return
pub fn grid_to_text(grid: &Grid) -> Vec<Vec<String>> {
    grid.iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::MemberKey;
    use crate::sheets::MemoryStore;

    fn attendance_store() -> MemoryStore {
        MemoryStore::default().with_sheet(
            "Raw",
            &[
                &["3/1", "3/8", "3/15"],
                &["Ada Lovelace\nAlan Turing", "ada lovelace", "ADA LOVELACE\nGrace Hopper"],
                &["Grace Hopper", "", ""],
            ],
        )
    }

    fn dues_store() -> MemoryStore {
        MemoryStore::default()
            .with_sheet(
                "Paid",
                &[
                    &["First-Name", "Last-Name", "Amount-Paid"],
                    &["Ada", "Lovelace", "$50.00"],
                    &["Alan", "Turing", "$20.00"],
                ],
            )
            .with_sheet(
                "Trips",
                &[
                    &["First-Name", "Last-Name", "Red Trips (not lead)", "First Trip", "Second Trip", "Third Trip"],
                    &["Ada", "Lovelace", "2", "Ridge", "Canyon", ""],
                ],
            )
            .with_sheet("Master", &[&["stale"]])
    }

    fn attendance_config() -> AttendanceConfig {
        AttendanceConfig {
            raw_sheet: SheetSelector::from("Raw"),
            summary_sheet: SheetSelector::from("totals"),
            presence_sheet: SheetSelector::from("presence"),
            ..AttendanceConfig::default()
        }
    }

    #[test]
    fn test_attendance_writes_both_sheets() {
        let mut store = attendance_store();
        let outcome = run_attendance(&mut store, &attendance_config(), WriteMode::Write).unwrap();

        assert_eq!(outcome.record.count(&MemberKey::new("ada lovelace").unwrap()), 3);
        assert_eq!(
            store.sheet("totals").unwrap(),
            &vec![
                vec!["Full-Name".to_string(), "Practices-Attended".to_string()],
                vec!["Grace Hopper".to_string(), "2".to_string()],
                vec!["Ada Lovelace".to_string(), "3".to_string()],
                vec!["Alan Turing".to_string(), "1".to_string()],
            ]
        );
        let presence = store.sheet("presence").unwrap();
        assert_eq!(presence[0], vec!["Name", "3/1", "3/8", "3/15"]);
        assert_eq!(presence[1], vec!["Ada Lovelace", "Present", "Present", "Present"]);
        assert_eq!(presence[2], vec!["Alan Turing", "Present", "Absent", "Absent"]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let mut store = attendance_store();
        run_attendance(&mut store, &attendance_config(), WriteMode::DryRun).unwrap();
        assert!(store.sheet("totals").is_none());

        let mut dues = dues_store();
        let summary = RawTable::default();
        let result = run_dues(&mut dues, &summary, &DuesConfig::default(), WriteMode::DryRun);
        assert!(result.is_err(), "empty summary has no Full-Name column");
        assert_eq!(dues.sheet("Master").unwrap(), &vec![vec!["stale".to_string()]]);
    }

    #[test]
    fn test_attendance_feeds_dues() {
        let mut store = attendance_store();
        let outcome = run_attendance(&mut store, &attendance_config(), WriteMode::Write).unwrap();

        let mut dues = dues_store();
        let ledger = run_dues(
            &mut dues,
            &outcome.summary_table(),
            &DuesConfig::default(),
            WriteMode::Write,
        )
        .unwrap();

        // Alan attended once, so only Paid contributes his row
        let alan = ledger.get(&MemberKey::new("alan turing").unwrap()).unwrap();
        assert_eq!(alan.attended, 0.0);

        assert_eq!(
            dues.sheet("Master").unwrap(),
            &vec![
                vec!["Full-Name", "Owed", "Amount-Paid", "Practices-Attended", "First Trip", "Second Trip", "Third Trip"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
                vec!["Ada Lovelace", "20.00", "50.00", "3", "Ridge", "Canyon", "Not on Trip"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                vec!["Alan Turing", "0.00", "20.00", "0", "Not on Trip", "Not on Trip", "Not on Trip"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                vec!["Grace Hopper", "10.00", "0.00", "2", "Not on Trip", "Not on Trip", "Not on Trip"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ]
        );
    }

    #[test]
    fn test_missing_input_sheet_errors() {
        let mut store = MemoryStore::default();
        assert!(run_attendance(&mut store, &attendance_config(), WriteMode::Write).is_err());
    }
}
