//! Join payments, trips and attendance into a ledger

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use crate::columns;
use crate::names::MemberKey;
use crate::table::parse::{cell_number, parse_currency, parse_number};
use crate::table::{Cell, RawTable, TableError};

use super::ledger::{DuesRecord, Ledger};
use super::pricing;

pub const DEFAULT_AMOUNT_PAID: &str = "$0.00";
pub const DEFAULT_TRIPS_NOT_LEADING: f64 = 0.0;
pub const DEFAULT_TRIP_LABEL: &str = "Not on Trip";
pub const DEFAULT_ATTENDED: f64 = 0.0;

/// Members need strictly more practices than this to be merged
pub const DEFAULT_MIN_PRACTICES: u32 = 1;

/// Rows of a first/last-name table keyed by member
struct KeyedRows<'a> {
    rows: BTreeMap<MemberKey, &'a [Cell]>,
}

impl<'a> KeyedRows<'a> {
    /// Key every row by its joined first and last name; the first row per key wins
    fn from_table(table: &'a RawTable, source: &str) -> Result<Self, TableError> {
        let first = table.column(columns::FIRST_NAME)?;
        let last = table.column(columns::LAST_NAME)?;

        let mut rows = BTreeMap::new();
        for (idx, row) in table.rows.iter().enumerate() {
            let key = MemberKey::from_parts(
                table.cell(row, first).as_text(),
                table.cell(row, last).as_text(),
            );
            let Some(key) = key else {
                log::warn!("{}: row {} has no name; skipping it", source, idx + 2);
                continue;
            };
            match rows.entry(key) {
                Entry::Vacant(e) => {
                    e.insert(row.as_slice());
                }
                Entry::Occupied(e) => {
                    log::debug!("{}: dropping duplicate entry for '{}'", source, e.key());
                }
            }
        }

        log::debug!("{}: {} members", source, rows.len());
        Ok(KeyedRows { rows })
    }

    fn get(&self, key: &MemberKey) -> Option<&'a [Cell]> {
        self.rows.get(key).copied()
    }
}

/// Members from the attendance summary with more than `min_practices` practices
///
/// Counts that are not numbers are treated as missing and excluded.
pub fn eligible_attendance(
    summary: &RawTable,
    min_practices: u32,
) -> Result<BTreeMap<MemberKey, f64>, TableError> {
    let name = summary.column(columns::FULL_NAME)?;
    let count = summary.column(columns::PRACTICES_ATTENDED)?;

    let mut eligible = BTreeMap::new();
    for row in &summary.rows {
        let Some(key) = summary.cell(row, name).as_text().and_then(MemberKey::new) else {
            continue;
        };
        let attended = match cell_number(summary.cell(row, count)) {
            Some(n) => n,
            None => {
                log::debug!("Attendance count for '{}' is not a number; excluding", key);
                continue;
            }
        };
        if attended > f64::from(min_practices) {
            eligible.entry(key).or_insert(attended);
        }
    }

    log::debug!(
        "{} members attended more than {} practices",
        eligible.len(),
        min_practices
    );
    Ok(eligible)
}

/// Reconcile the Paid, Trips and attendance Summary tables into a ledger
///
/// Every member present in Paid, Trips, or the filtered summary gets exactly
/// one ledger row. Missing values take the `DEFAULT_*` constants above.
pub fn reconcile(
    paid: &RawTable,
    trips: &RawTable,
    summary: &RawTable,
    min_practices: u32,
) -> Result<Ledger, TableError> {
    let amount_col = paid.column(columns::AMOUNT_PAID)?;
    let not_leading_col = trips.column(columns::TRIPS_NOT_LEADING)?;
    let label_cols = [
        trips.column(columns::FIRST_TRIP)?,
        trips.column(columns::SECOND_TRIP)?,
        trips.column(columns::THIRD_TRIP)?,
    ];

    let paid_rows = KeyedRows::from_table(paid, "Paid")?;
    let trip_rows = KeyedRows::from_table(trips, "Trips")?;
    let attendance = eligible_attendance(summary, min_practices)?;

    let keys: BTreeSet<&MemberKey> = paid_rows
        .rows
        .keys()
        .chain(trip_rows.rows.keys())
        .chain(attendance.keys())
        .collect();

    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        let paid_row = paid_rows.get(key);
        let trip_row = trip_rows.get(key);

        let amount_text = paid_row
            .and_then(|row| paid.cell(row, amount_col).as_text())
            .unwrap_or(DEFAULT_AMOUNT_PAID);
        let amount_paid = parse_currency(amount_text).unwrap_or_else(|| {
            log::warn!(
                "Amount paid '{}' for '{}' is not a number; counting it as 0",
                amount_text,
                key
            );
            0.0
        });

        let trips_not_leading = trip_row
            .and_then(|row| trips.cell(row, not_leading_col).as_text())
            .and_then(|text| {
                let parsed = parse_number(text);
                if parsed.is_none() {
                    log::warn!(
                        "Trip count '{}' for '{}' is not a number; using {}",
                        text,
                        key,
                        DEFAULT_TRIPS_NOT_LEADING
                    );
                }
                parsed
            })
            .unwrap_or(DEFAULT_TRIPS_NOT_LEADING);

        let trip_labels = label_cols.map(|col| {
            trip_row
                .and_then(|row| trips.cell(row, col).as_text())
                .unwrap_or(DEFAULT_TRIP_LABEL)
                .to_string()
        });

        let attended = attendance.get(key).copied().unwrap_or(DEFAULT_ATTENDED);

        records.push(DuesRecord {
            key: key.clone(),
            display_name: key.display_name(),
            amount_paid,
            trips_not_leading,
            trips: trip_labels,
            attended,
            owed: pricing::owed(trips_not_leading, amount_paid),
        });
    }

    Ok(Ledger::new(records))
}
