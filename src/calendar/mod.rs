//! Event calendar
//!
//! - **classify**: Day Classifier and the period/event data model
//! - **reference**: 2026 reference tables
//! - **render**: twelve-month view builder and element renderer
//!
//! ```rust
//! use marketcal::calendar::{build_calendar, CalendarConfig, DayClassification};
//!
//! let view = build_calendar(2026, &CalendarConfig::default());
//! assert_eq!(view.months[1].days.len(), 28);
//! assert_eq!(view.months[8].days[0].classification, DayClassification::Caution);
//! ```

pub mod classify;
pub mod reference;
pub mod render;

pub use classify::{classify, days_in_month, DayClassification, Event, EventKind, Period};
pub use render::{
    build_calendar, render_calendar, CalendarConfig, CalendarDay, CalendarMonth, CalendarView,
    CellStyle, EVENT_MARKER,
};
