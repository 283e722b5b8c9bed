//! Build per-member attended sets from a sign-in table

use std::collections::{BTreeSet, HashMap};

use crate::names::MemberKey;
use crate::table::RawTable;

/// A column header naming one tracked event
pub type EventId = String;

/// Which events each member attended
#[derive(Debug, Clone, Default)]
pub struct AttendanceRecord {
    /// Event columns, in sheet order
    events: Vec<EventId>,
    /// Members in the order they were first seen
    members: Vec<MemberKey>,
    /// Attended event indices per member
    attended: HashMap<MemberKey, BTreeSet<usize>>,
}

impl AttendanceRecord {
    /// Aggregate a sign-in table; every column not in `skip_columns` is an event
    ///
    /// Each cell lists attendee names one per line. Columns sharing a header
    /// are one event.
    pub fn aggregate(table: &RawTable, skip_columns: &[String]) -> Self {
        let mut record = AttendanceRecord::default();

        for (col, header) in table.headers.iter().enumerate() {
            if skip_columns.iter().any(|s| s == header) {
                log::debug!("Skipping non-event column '{}'", header);
                continue;
            }

            let event_idx = match record.events.iter().position(|e| e == header) {
                Some(idx) => {
                    log::debug!("Merging repeated event column '{}'", header);
                    idx
                }
                None => {
                    record.events.push(header.clone());
                    record.events.len() - 1
                }
            };

            for row in &table.rows {
                let Some(text) = row[col].as_text() else {
                    continue;
                };
                for key in text.lines().filter_map(MemberKey::new) {
                    record.mark(key, event_idx);
                }
            }
        }

        log::info!(
            "Aggregated {} members across {} events",
            record.members.len(),
            record.events.len()
        );
        record
    }

    fn mark(&mut self, key: MemberKey, event_idx: usize) {
        match self.attended.get_mut(&key) {
            Some(events) => {
                events.insert(event_idx);
            }
            None => {
                self.members.push(key.clone());
                self.attended.insert(key, BTreeSet::from([event_idx]));
            }
        }
    }

    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    /// Members in first-seen order
    pub fn members(&self) -> &[MemberKey] {
        &self.members
    }

    /// Number of distinct events `key` attended
    pub fn count(&self, key: &MemberKey) -> usize {
        self.attended.get(key).map_or(0, BTreeSet::len)
    }

    pub fn attended(&self, key: &MemberKey, event_idx: usize) -> bool {
        self.attended
            .get(key)
            .is_some_and(|events| events.contains(&event_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::from_grid(
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn key(name: &str) -> MemberKey {
        MemberKey::new(name).unwrap()
    }

    #[test]
    fn test_case_insensitive_merge() {
        let t = table(&[&["3/1", "3/8"], &["Alice\nBob", "bob"]]);
        let record = AttendanceRecord::aggregate(&t, &[]);

        assert_eq!(record.count(&key("alice")), 1);
        assert_eq!(record.count(&key("bob")), 2);
        assert_eq!(record.members().len(), 2);
        assert!(record.attended(&key("Bob"), 0));
        assert!(record.attended(&key("Bob"), 1));
    }

    #[test]
    fn test_whitespace_and_duplicates_within_event() {
        let t = table(&[
            &["3/1", "3/8"],
            &["  Carol Danvers \n\ncarol danvers\r\n", "CAROL  DANVERS"],
        ]);
        let record = AttendanceRecord::aggregate(&t, &[]);

        assert_eq!(record.members(), &[key("carol danvers")]);
        assert_eq!(record.count(&key("carol danvers")), 2);
    }

    #[test]
    fn test_cells_across_rows() {
        let t = table(&[&["3/1", "3/8"], &["Alice", ""], &["Dan", "Alice"]]);
        let record = AttendanceRecord::aggregate(&t, &[]);

        assert_eq!(record.count(&key("alice")), 2);
        assert_eq!(record.count(&key("dan")), 1);
        assert!(record.attended(&key("dan"), 0));
        assert!(!record.attended(&key("dan"), 1));
        assert_eq!(record.count(&key("nobody")), 0);
    }

    #[test]
    fn test_repeated_header_is_one_event() {
        let t = table(&[&["3/1", "3/1", "3/8"], &["Alice", "alice\nBob", "Bob"]]);
        let record = AttendanceRecord::aggregate(&t, &[]);

        assert_eq!(record.events(), &["3/1".to_string(), "3/8".to_string()]);
        assert_eq!(record.count(&key("alice")), 1);
        assert_eq!(record.count(&key("bob")), 2);
        assert!(record.attended(&key("bob"), 0));
    }

    #[test]
    fn test_skip_columns() {
        let t = table(&[&["Notes", "3/1"], &["Rainy", "Alice"]]);
        let record = AttendanceRecord::aggregate(&t, &["Notes".to_string()]);

        assert_eq!(record.events(), &["3/1".to_string()]);
        assert_eq!(record.count(&key("rainy")), 0);
        assert_eq!(record.count(&key("alice")), 1);
    }

    #[test]
    fn test_empty_table() {
        let record = AttendanceRecord::aggregate(&RawTable::default(), &[]);
        assert!(record.members().is_empty());
        assert!(record.events().is_empty());
    }
}
