//! 2026 reference tables
//!
//! Statistically favorable windows, the weak-September caution window and
//! the confirmed 2026 macro release dates. Months are zero-based.

use super::classify::EventKind::{InflationReport as Cpi, LaborReport as Nfp, RateDecision as Fomc};
use super::classify::{Event, Period};

/// Year the reference tables describe
pub const REFERENCE_YEAR: i32 = 2026;

pub const FAVORABLE_PERIODS: &[Period] = &[
    Period::new(0, 25, 31),
    Period::new(1, 1, 7),
    Period::new(2, 10, 20),
    Period::new(3, 1, 30),
    Period::new(6, 10, 25),
    Period::new(9, 1, 10),
    Period::new(10, 1, 30),
    Period::new(11, 15, 31),
];

pub const CAUTION_PERIODS: &[Period] = &[Period::new(8, 1, 30)];

pub const EVENTS: &[Event] = &[
    // FOMC: decision day of each two-day meeting
    Event::new(0, 28, Fomc),
    Event::new(2, 18, Fomc),
    Event::new(3, 29, Fomc),
    Event::new(5, 17, Fomc),
    Event::new(6, 29, Fomc),
    Event::new(8, 16, Fomc),
    Event::new(9, 28, Fomc),
    Event::new(11, 9, Fomc),
    // Non-Farm Payrolls
    Event::new(1, 6, Nfp),
    Event::new(2, 6, Nfp),
    Event::new(3, 3, Nfp),
    Event::new(4, 8, Nfp),
    Event::new(5, 5, Nfp),
    Event::new(6, 3, Nfp),
    Event::new(7, 7, Nfp),
    Event::new(8, 4, Nfp),
    Event::new(9, 2, Nfp),
    Event::new(10, 6, Nfp),
    Event::new(11, 4, Nfp),
    // CPI
    Event::new(1, 11, Cpi),
    Event::new(2, 11, Cpi),
    Event::new(3, 10, Cpi),
    Event::new(4, 13, Cpi),
    Event::new(5, 10, Cpi),
    Event::new(6, 10, Cpi),
    Event::new(7, 12, Cpi),
    Event::new(8, 11, Cpi),
    Event::new(9, 14, Cpi),
    Event::new(10, 12, Cpi),
    Event::new(11, 11, Cpi),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::classify::EventKind;

    #[test]
    fn test_reference_tables_fit_2026() {
        assert!(FAVORABLE_PERIODS.iter().all(|p| p.is_valid_for(REFERENCE_YEAR)));
        assert!(CAUTION_PERIODS.iter().all(|p| p.is_valid_for(REFERENCE_YEAR)));
        assert!(EVENTS.iter().all(|e| e.is_valid_for(REFERENCE_YEAR)));
    }

    #[test]
    fn test_event_counts() {
        let count = |kind| EVENTS.iter().filter(|e| e.kind == kind).count();
        assert_eq!(count(EventKind::RateDecision), 8);
        assert_eq!(count(EventKind::LaborReport), 11);
        assert_eq!(count(EventKind::InflationReport), 11);
    }
}
