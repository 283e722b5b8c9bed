//! Dues reconciliation
//!
//! Joins the Paid and Trips tables with the filtered attendance summary on
//! [`MemberKey`](crate::names::MemberKey), fills defaults, and prices each
//! member with [`pricing::owed`].

mod ledger;
pub mod pricing;
mod reconcile;

pub use ledger::{DuesRecord, Ledger, LedgerTotals};
pub use reconcile::{
    DEFAULT_AMOUNT_PAID, DEFAULT_ATTENDED, DEFAULT_MIN_PRACTICES, DEFAULT_TRIP_LABEL,
    DEFAULT_TRIPS_NOT_LEADING, eligible_attendance, reconcile,
};
