//! Day Classifier
//!
//! Maps a `(month, day)` pair onto exactly one [`DayClassification`] from the
//! static period and event tables. Months are zero-based (0 = January).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed day range inside a single month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Zero-based month (0-11)
    pub month: u32,
    /// First day of the range (1-based, inclusive)
    #[serde(alias = "start_day")]
    pub start: u32,
    /// Last day of the range (inclusive)
    #[serde(alias = "end_day")]
    pub end: u32,
}

impl Period {
    pub const fn new(month: u32, start: u32, end: u32) -> Self {
        Self { month, start, end }
    }

    /// Check if the period covers a day
    pub fn contains(&self, month: u32, day: u32) -> bool {
        self.month == month && day >= self.start && day <= self.end
    }

    /// Check the range fits inside its month for `year`
    pub fn is_valid_for(&self, year: i32) -> bool {
        self.start >= 1 && self.start <= self.end && self.end <= days_in_month(year, self.month)
    }
}

/// Kind of scheduled macro event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Central bank rate decision (FOMC)
    #[serde(alias = "fomc", alias = "FOMC")]
    RateDecision,
    /// Labor market report (Non-Farm Payrolls)
    #[serde(alias = "nfp", alias = "NFP")]
    LaborReport,
    /// Inflation report (CPI)
    #[serde(alias = "cpi", alias = "CPI")]
    InflationReport,
}

impl EventKind {
    /// Locale-neutral label id
    pub fn label_key(&self) -> &'static str {
        match self {
            EventKind::RateDecision => "event.rate_decision",
            EventKind::LaborReport => "event.labor_report",
            EventKind::InflationReport => "event.inflation_report",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::RateDecision => write!(f, "rate_decision"),
            EventKind::LaborReport => write!(f, "labor_report"),
            EventKind::InflationReport => write!(f, "inflation_report"),
        }
    }
}

/// A single-day annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Zero-based month (0-11)
    pub month: u32,
    /// Day of month (1-based)
    pub day: u32,
    #[serde(alias = "type")]
    pub kind: EventKind,
}

impl Event {
    pub const fn new(month: u32, day: u32, kind: EventKind) -> Self {
        Self { month, day, kind }
    }

    pub fn is_on(&self, month: u32, day: u32) -> bool {
        self.month == month && self.day == day
    }

    pub fn is_valid_for(&self, year: i32) -> bool {
        self.day >= 1 && self.day <= days_in_month(year, self.month)
    }
}

/// Classification of a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayClassification {
    Event,
    Caution,
    Favorable,
    Neutral,
}

impl std::fmt::Display for DayClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayClassification::Event => write!(f, "event"),
            DayClassification::Caution => write!(f, "caution"),
            DayClassification::Favorable => write!(f, "favorable"),
            DayClassification::Neutral => write!(f, "neutral"),
        }
    }
}

/// Classify a day. Precedence: Event > Caution > Favorable > Neutral.
pub fn classify(
    month: u32,
    day: u32,
    events: &[Event],
    caution_periods: &[Period],
    favorable_periods: &[Period],
) -> DayClassification {
    if events.iter().any(|e| e.is_on(month, day)) {
        DayClassification::Event
    } else if caution_periods.iter().any(|p| p.contains(month, day)) {
        DayClassification::Caution
    } else if favorable_periods.iter().any(|p| p.contains(month, day)) {
        DayClassification::Favorable
    } else {
        DayClassification::Neutral
    }
}

/// Number of days in a zero-based month, 0 for an invalid month or year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month > 11 {
        return 0;
    }

    let first = NaiveDate::from_ymd_opt(year, month + 1, 1);
    let next = if month == 11 {
        year.checked_add(1).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_beats_periods() {
        let events = [Event::new(8, 16, EventKind::RateDecision)];
        let caution = [Period::new(8, 1, 30)];
        let favorable = [Period::new(8, 10, 20)];

        assert_eq!(
            classify(8, 16, &events, &caution, &favorable),
            DayClassification::Event
        );
        assert_eq!(
            classify(8, 15, &events, &caution, &favorable),
            DayClassification::Caution
        );
    }

    #[test]
    fn test_caution_beats_favorable() {
        let caution = [Period::new(3, 10, 12)];
        let favorable = [Period::new(3, 1, 30)];

        assert_eq!(classify(3, 11, &[], &caution, &favorable), DayClassification::Caution);
        assert_eq!(classify(3, 9, &[], &caution, &favorable), DayClassification::Favorable);
        assert_eq!(classify(4, 9, &[], &caution, &favorable), DayClassification::Neutral);
    }

    #[test]
    fn test_period_bounds_inclusive() {
        let period = Period::new(0, 25, 31);
        assert!(!period.contains(0, 24));
        assert!(period.contains(0, 25));
        assert!(period.contains(0, 31));
        assert!(!period.contains(1, 25));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 0), 31);
        assert_eq!(days_in_month(2026, 1), 28);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2026, 3), 30);
        assert_eq!(days_in_month(2026, 11), 31);
        assert_eq!(days_in_month(2026, 12), 0);
        assert_eq!(days_in_month(2026, u32::MAX), 0);
        assert_eq!(days_in_month(i32::MAX, 11), 0);
        assert_eq!(days_in_month(i32::MIN, 0), 0);
    }

    #[test]
    fn test_period_validation() {
        assert!(Period::new(1, 1, 28).is_valid_for(2026));
        assert!(!Period::new(1, 1, 29).is_valid_for(2026));
        assert!(Period::new(1, 1, 29).is_valid_for(2024));
        assert!(!Period::new(0, 0, 5).is_valid_for(2026));
        assert!(!Period::new(0, 10, 5).is_valid_for(2026));
        assert!(!Period::new(12, 1, 5).is_valid_for(2026));

        assert!(!Event::new(3, 31, EventKind::LaborReport).is_valid_for(2026));
    }

    #[test]
    fn test_event_kind_aliases() {
        let event: Event = toml::from_str("month = 0\nday = 28\nkind = \"FOMC\"").unwrap();
        assert_eq!(event.kind, EventKind::RateDecision);

        let event: Event = toml::from_str("month = 1\nday = 6\ntype = \"nfp\"").unwrap();
        assert_eq!(event.kind, EventKind::LaborReport);

        let event: Event =
            toml::from_str("month = 1\nday = 11\nkind = \"inflation_report\"").unwrap();
        assert_eq!(event.kind, EventKind::InflationReport);
    }
}
