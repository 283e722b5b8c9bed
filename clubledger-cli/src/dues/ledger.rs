//! Reconciled dues records

use crate::columns;
use crate::names::MemberKey;
use crate::table::{Grid, Value};

/// One member's reconciled dues
#[derive(Debug, Clone, PartialEq)]
pub struct DuesRecord {
    pub key: MemberKey,
    pub display_name: String,
    pub amount_paid: f64,
    pub trips_not_leading: f64,
    /// First, second and third trip labels
    pub trips: [String; 3],
    pub attended: f64,
    pub owed: f64,
}

/// Dues records sorted by display name
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub records: Vec<DuesRecord>,
}

/// Aggregates reported after a run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerTotals {
    pub members: usize,
    pub owing: usize,
    pub owed: f64,
    pub paid: f64,
}

impl Ledger {
    pub fn new(mut records: Vec<DuesRecord>) -> Self {
        records.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ledger { records }
    }

    pub fn get(&self, key: &MemberKey) -> Option<&DuesRecord> {
        self.records.iter().find(|r| &r.key == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn totals(&self) -> LedgerTotals {
        self.records
            .iter()
            .fold(LedgerTotals::default(), |mut totals, record| {
                totals.members += 1;
                if record.owed > 0.0 {
                    totals.owing += 1;
                }
                totals.owed += record.owed;
                totals.paid += record.amount_paid;
                totals
            })
    }

    /// Ledger sheet: name, owed, paid, attended, trip labels
    pub fn to_grid(&self) -> Grid {
        let mut header = vec![
            Value::from(columns::FULL_NAME),
            Value::from(columns::OWED),
            Value::from(columns::AMOUNT_PAID),
            Value::from(columns::PRACTICES_ATTENDED),
        ];
        header.extend(columns::TRIP_LABELS.iter().map(|c| Value::from(*c)));

        let mut grid = vec![header];
        for record in &self.records {
            let mut row = vec![
                Value::String(record.display_name.clone()),
                Value::Float(record.owed),
                Value::Float(record.amount_paid),
                Value::number(record.attended),
            ];
            row.extend(record.trips.iter().map(|t| Value::String(t.clone())));
            grid.push(row);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, paid: f64, owed: f64, attended: f64) -> DuesRecord {
        let key = MemberKey::new(name).unwrap();
        DuesRecord {
            display_name: key.display_name(),
            key,
            amount_paid: paid,
            trips_not_leading: 0.0,
            trips: ["Ridge".into(), "Not on Trip".into(), "Not on Trip".into()],
            attended,
            owed,
        }
    }

    #[test]
    fn test_sorted_by_display_name() {
        let ledger = Ledger::new(vec![
            record("grace hopper", 0.0, 10.0, 0.0),
            record("ada lovelace", 50.0, 20.0, 4.0),
        ]);
        assert_eq!(ledger.records[0].display_name, "Ada Lovelace");
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.is_empty());
        assert!(Ledger::default().is_empty());
    }

    #[test]
    fn test_totals() {
        let ledger = Ledger::new(vec![
            record("ada lovelace", 50.0, 20.0, 4.0),
            record("alan turing", 20.0, 0.0, 0.0),
            record("grace hopper", 0.5, 9.5, 2.0),
        ]);
        assert_eq!(
            ledger.totals(),
            LedgerTotals {
                members: 3,
                owing: 2,
                owed: 29.5,
                paid: 70.5,
            }
        );
        assert_eq!(Ledger::default().totals(), LedgerTotals::default());
    }

    #[test]
    fn test_to_grid() {
        let grid = Ledger::new(vec![record("ada lovelace", 50.0, 20.0, 2.5)]).to_grid();
        assert_eq!(grid[0].len(), 7);
        assert_eq!(grid[0][1], Value::from("Owed"));
        assert_eq!(
            grid[1],
            vec![
                Value::from("Ada Lovelace"),
                Value::Float(20.0),
                Value::Float(50.0),
                Value::Float(2.5),
                Value::from("Ridge"),
                Value::from("Not on Trip"),
                Value::from("Not on Trip"),
            ]
        );
    }
}
