//! Summary and presence outputs of the attendance pipeline

use crate::columns;
use crate::names::MemberKey;
use crate::table::{Grid, Value};

use super::{AttendanceRecord, EventId};

/// One member's attended count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub key: MemberKey,
    pub attended: usize,
}

/// Attended counts, sorted by surname
#[derive(Debug, Clone, Default)]
pub struct AttendanceSummary {
    pub entries: Vec<SummaryEntry>,
}

impl AttendanceSummary {
    /// Entries sorted by surname; members sharing a surname keep first-seen order
    pub fn from_record(record: &AttendanceRecord) -> Self {
        let mut entries: Vec<(String, SummaryEntry)> = record
            .members()
            .iter()
            .map(|key| {
                let entry = SummaryEntry {
                    key: key.clone(),
                    attended: record.count(key),
                };
                (key.surname(), entry)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        AttendanceSummary {
            entries: entries.into_iter().map(|(_, entry)| entry).collect(),
        }
    }

    pub fn get(&self, key: &MemberKey) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.attended)
    }

    /// `Full-Name`, `Practices-Attended` grid
    pub fn to_grid(&self) -> Grid {
        let mut grid = vec![vec![
            Value::from(columns::FULL_NAME),
            Value::from(columns::PRACTICES_ATTENDED),
        ]];
        for entry in &self.entries {
            grid.push(vec![
                Value::String(entry.key.display_name()),
                Value::Int(entry.attended as i64),
            ]);
        }
        grid
    }
}

/// Member × event matrix of "Present"/"Absent"
#[derive(Debug, Clone, Default)]
pub struct PresenceMatrix {
    pub events: Vec<EventId>,
    /// Members in first-seen order with one flag per event
    pub rows: Vec<(MemberKey, Vec<bool>)>,
}

impl PresenceMatrix {
    pub fn from_record(record: &AttendanceRecord) -> Self {
        let events = record.events().to_vec();
        let rows = record
            .members()
            .iter()
            .map(|key| {
                let flags = (0..events.len())
                    .map(|idx| record.attended(key, idx))
                    .collect();
                (key.clone(), flags)
            })
            .collect();
        PresenceMatrix { events, rows }
    }

    /// `Name` followed by one column per event
    pub fn to_grid(&self) -> Grid {
        let mut header = vec![Value::from(columns::NAME)];
        header.extend(self.events.iter().map(|e| Value::String(e.clone())));

        let mut grid = vec![header];
        for (key, flags) in &self.rows {
            let mut row = vec![Value::String(key.display_name())];
            row.extend(flags.iter().map(|present| {
                Value::from(if *present {
                    columns::PRESENT
                } else {
                    columns::ABSENT
                })
            }));
            grid.push(row);
        }
        grid
    }
}
