//! Column names of the club's sheets

pub const FIRST_NAME: &str = "First-Name";
pub const LAST_NAME: &str = "Last-Name";
pub const FULL_NAME: &str = "Full-Name";
pub const AMOUNT_PAID: &str = "Amount-Paid";
pub const OWED: &str = "Owed";
pub const PRACTICES_ATTENDED: &str = "Practices-Attended";
pub const TRIPS_NOT_LEADING: &str = "Red Trips (not lead)";
pub const FIRST_TRIP: &str = "First Trip";
pub const SECOND_TRIP: &str = "Second Trip";
pub const THIRD_TRIP: &str = "Third Trip";

/// Trip label columns, in output order
pub const TRIP_LABELS: [&str; 3] = [FIRST_TRIP, SECOND_TRIP, THIRD_TRIP];

/// First column of the presence matrix
pub const NAME: &str = "Name";

pub const PRESENT: &str = "Present";
pub const ABSENT: &str = "Absent";
