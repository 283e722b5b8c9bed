//! The club's dues rule

use crate::table::parse::round_cents;

/// Charge per trip taken without leading it
pub const TRIP_RATE: f64 = 30.0;

/// Base due charged to every member
pub const BASE_DUE: f64 = 10.0;

/// Balance owed after `amount_paid`, never negative
pub fn owed(trips_not_leading: f64, amount_paid: f64) -> f64 {
    let due = trips_not_leading * TRIP_RATE + BASE_DUE;
    round_cents((due - amount_paid).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owed() {
        assert_eq!(owed(2.0, 50.0), 20.0);
        assert_eq!(owed(0.0, 20.0), 0.0);
        assert_eq!(owed(0.0, 0.0), 10.0);
        assert_eq!(owed(1.0, 40.0), 0.0);
        assert_eq!(owed(3.0, 12.5), 87.5);
        assert_eq!(owed(1.5, 10.0), 45.0);
    }
}
