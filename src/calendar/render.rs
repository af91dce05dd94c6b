//! Calendar Renderer
//!
//! Builds a classified twelve-month view of one year and renders it into an
//! element container. Deterministic: no randomness is involved.

use serde::{Deserialize, Serialize};

use super::classify::{classify, days_in_month, DayClassification, Event, EventKind, Period};
use super::reference;
use crate::dom::Element;
use crate::labels::Labels;

/// Marker appended to the day number on event days
pub const EVENT_MARKER: &str = "⚠️";

/// Period and event tables for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_favorable_periods")]
    pub favorable_periods: Vec<Period>,

    #[serde(default = "default_caution_periods")]
    pub caution_periods: Vec<Period>,

    #[serde(default = "default_events")]
    pub events: Vec<Event>,
}

fn default_favorable_periods() -> Vec<Period> {
    reference::FAVORABLE_PERIODS.to_vec()
}

fn default_caution_periods() -> Vec<Period> {
    reference::CAUTION_PERIODS.to_vec()
}

fn default_events() -> Vec<Event> {
    reference::EVENTS.to_vec()
}

impl Default for CalendarConfig {
    /// The 2026 reference tables
    fn default() -> Self {
        Self {
            favorable_periods: default_favorable_periods(),
            caution_periods: default_caution_periods(),
            events: default_events(),
        }
    }
}

impl CalendarConfig {
    /// Config with no periods or events (every day neutral)
    pub fn empty() -> Self {
        Self {
            favorable_periods: Vec::new(),
            caution_periods: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Copy of the config with entries that do not fit `year` removed
    pub fn sanitized(&self, year: i32) -> Self {
        let keep_period = |kind: &str, p: &Period| {
            let valid = p.is_valid_for(year);
            if !valid {
                tracing::warn!(
                    kind,
                    month = p.month,
                    start = p.start,
                    end = p.end,
                    year,
                    "Skipping period outside its month"
                );
            }
            valid
        };

        Self {
            favorable_periods: self
                .favorable_periods
                .iter()
                .filter(|p| keep_period("favorable", *p))
                .copied()
                .collect(),
            caution_periods: self
                .caution_periods
                .iter()
                .filter(|p| keep_period("caution", *p))
                .copied()
                .collect(),
            events: self
                .events
                .iter()
                .filter(|e| {
                    let valid = e.is_valid_for(year);
                    if !valid {
                        tracing::warn!(month = e.month, day = e.day, kind = %e.kind, year, "Skipping event outside its month");
                    }
                    valid
                })
                .copied()
                .collect(),
        }
    }

    /// Classify one day against these tables
    pub fn classify(&self, month: u32, day: u32) -> DayClassification {
        classify(
            month,
            day,
            &self.events,
            &self.caution_periods,
            &self.favorable_periods,
        )
    }

    pub fn event_on(&self, month: u32, day: u32) -> Option<EventKind> {
        self.events
            .iter()
            .find(|e| e.is_on(month, day))
            .map(|e| e.kind)
    }
}

/// Visual style of a day cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub background: &'static str,
    pub color: &'static str,
    pub font_weight: u16,
}

impl CellStyle {
    pub fn for_classification(classification: DayClassification) -> Self {
        match classification {
            DayClassification::Event => Self {
                background: "#f59e0b",
                color: "var(--navy-deep)",
                font_weight: 700,
            },
            DayClassification::Favorable => Self {
                background: "var(--emerald)",
                color: "var(--navy-deep)",
                font_weight: 600,
            },
            DayClassification::Caution => Self {
                background: "var(--coral)",
                color: "var(--white)",
                font_weight: 600,
            },
            DayClassification::Neutral => Self {
                background: "rgba(255, 255, 255, 0.05)",
                color: "var(--gray-400)",
                font_weight: 500,
            },
        }
    }
}

/// One classified day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub classification: DayClassification,
    pub event: Option<EventKind>,
}

/// One month of classified days
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    /// Zero-based month
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn count(&self, classification: DayClassification) -> usize {
        self.days
            .iter()
            .filter(|d| d.classification == classification)
            .count()
    }
}

/// A classified year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub months: Vec<CalendarMonth>,
}

impl CalendarView {
    pub fn days(&self) -> impl Iterator<Item = (u32, &CalendarDay)> {
        self.months
            .iter()
            .flat_map(|m| m.days.iter().map(move |d| (m.month, d)))
    }

    pub fn count(&self, classification: DayClassification) -> usize {
        self.months.iter().map(|m| m.count(classification)).sum()
    }
}

/// Classify every day of `year`
pub fn build_calendar(year: i32, config: &CalendarConfig) -> CalendarView {
    let config = config.sanitized(year);

    let months = (0..12)
        .map(|month| CalendarMonth {
            month,
            days: (1..=days_in_month(year, month))
                .map(|day| CalendarDay {
                    day,
                    classification: config.classify(month, day),
                    event: config.event_on(month, day),
                })
                .collect(),
        })
        .collect();

    CalendarView { year, months }
}

/// Clear `container` and render the twelve-month grid into it
pub fn render_calendar(container: &mut Element, view: &CalendarView, labels: &Labels) {
    container.clear();
    container.set_style("display", "grid");
    container.set_style("grid-template-columns", "repeat(auto-fit, minmax(200px, 1fr))");
    container.set_style("gap", "2rem");

    for month in &view.months {
        let mut days_grid = Element::div("calendar-days")
            .style("display", "grid")
            .style("grid-template-columns", "repeat(7, 1fr)")
            .style("gap", "4px");

        for day in &month.days {
            days_grid.append(day_cell(day, labels));
        }

        container.append(
            Element::div("calendar-month")
                .style("margin-bottom", "2rem")
                .child(Element::div("calendar-month-header").text(labels.month_long(month.month)))
                .child(days_grid),
        );
    }

    tracing::debug!(year = view.year, months = view.months.len(), "Rendered calendar");
}

fn day_cell(day: &CalendarDay, labels: &Labels) -> Element {
    let style = CellStyle::for_classification(day.classification);

    let text = match day.event {
        Some(_) => format!("{}{}", day.day, EVENT_MARKER),
        None => day.day.to_string(),
    };

    let title = match (day.classification, day.event) {
        (DayClassification::Event, Some(kind)) => labels.event(kind),
        (classification, _) => labels.classification(classification),
    };

    Element::div("calendar-day")
        .class(day.classification.to_string())
        .style("background", style.background)
        .style("color", style.color)
        .style("font-weight", style.font_weight.to_string())
        .title(title)
        .text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Locale;

    #[test]
    fn test_month_lengths_2026() {
        let view = build_calendar(2026, &CalendarConfig::default());
        let lengths: Vec<usize> = view.months.iter().map(|m| m.days.len()).collect();
        assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        assert_eq!(view.days().count(), 365);
    }

    #[test]
    fn test_full_month_favorable() {
        let config = CalendarConfig {
            favorable_periods: vec![Period::new(3, 1, 30)],
            caution_periods: vec![],
            events: vec![Event::new(3, 10, EventKind::InflationReport)],
        };
        let view = build_calendar(2026, &config);
        let april = &view.months[3];

        for day in &april.days {
            if day.day == 10 {
                assert_eq!(day.classification, DayClassification::Event);
                assert_eq!(day.event, Some(EventKind::InflationReport));
            } else {
                assert_eq!(day.classification, DayClassification::Favorable);
            }
        }
    }

    #[test]
    fn test_reference_september_is_caution_except_events() {
        let view = build_calendar(2026, &CalendarConfig::default());
        let september = &view.months[8];

        // NFP on the 4th, CPI on the 11th, FOMC on the 16th
        assert_eq!(september.count(DayClassification::Event), 3);
        assert_eq!(september.count(DayClassification::Caution), 27);
        assert_eq!(september.count(DayClassification::Favorable), 0);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let config = CalendarConfig {
            favorable_periods: vec![Period::new(1, 1, 30), Period::new(0, 1, 2)],
            caution_periods: vec![Period::new(14, 1, 5)],
            events: vec![Event::new(1, 29, EventKind::RateDecision)],
        };
        let view = build_calendar(2026, &config);

        assert_eq!(view.months[1].days.len(), 28);
        assert_eq!(view.months[1].count(DayClassification::Neutral), 28);
        assert_eq!(view.months[0].count(DayClassification::Favorable), 2);
        assert_eq!(view.count(DayClassification::Event), 0);
        assert_eq!(view.count(DayClassification::Caution), 0);
    }

    #[test]
    fn test_out_of_range_month_and_year_are_skipped() {
        let config = CalendarConfig {
            favorable_periods: vec![Period::new(u32::MAX, 1, 5), Period::new(2, 1, 3)],
            caution_periods: vec![Period::new(u32::MAX - 1, 1, 5)],
            events: vec![Event::new(u32::MAX, 1, EventKind::InflationReport)],
        };
        let view = build_calendar(2026, &config);

        assert_eq!(view.days().count(), 365);
        assert_eq!(view.count(DayClassification::Favorable), 3);
        assert_eq!(view.count(DayClassification::Caution), 0);
        assert_eq!(view.count(DayClassification::Event), 0);

        let parsed: CalendarConfig =
            toml::from_str("events = [{ month = 4294967295, day = 1, kind = \"cpi\" }]").unwrap();
        assert_eq!(build_calendar(2026, &parsed).count(DayClassification::Event), 0);

        // Beyond the supported date range every month is empty
        let far = build_calendar(i32::MAX, &CalendarConfig::empty());
        assert_eq!(far.months.len(), 12);
        assert_eq!(far.days().count(), 0);
    }

    #[test]
    fn test_render_calendar_cells() {
        let view = build_calendar(2026, &CalendarConfig::default());
        let labels = Labels::new(Locale::Ro);
        let mut container = Element::new("div").id("calendar-2026-grid");

        render_calendar(&mut container, &view, &labels);

        assert_eq!(container.find_by_class("calendar-month").len(), 12);
        assert_eq!(container.find_by_class("calendar-day").len(), 365);

        let february = container.find_by_class("calendar-month")[1].find_by_class("calendar-day");
        assert_eq!(february.len(), 28);

        // February 6th: NFP
        let nfp = february[5];
        assert_eq!(nfp.text.as_deref(), Some("6⚠️"));
        assert_eq!(nfp.title.as_deref(), Some("Non-Farm Payrolls (Raport Piața Muncii)"));
        assert_eq!(nfp.style_value("background"), Some("#f59e0b"));
        assert!(nfp.has_class("event"));

        // February 1st: favorable
        let first = february[0];
        assert_eq!(first.text.as_deref(), Some("1"));
        assert_eq!(first.style_value("background"), Some("var(--emerald)"));
    }

    #[test]
    fn test_render_calendar_is_idempotent() {
        let view = build_calendar(2026, &CalendarConfig::default());
        let labels = Labels::default();
        let mut container = Element::new("div");

        render_calendar(&mut container, &view, &labels);
        let first = container.to_html();
        render_calendar(&mut container, &view, &labels);

        assert_eq!(container.to_html(), first);
    }

    #[test]
    fn test_styles_are_distinct() {
        let styles: Vec<CellStyle> = [
            DayClassification::Event,
            DayClassification::Caution,
            DayClassification::Favorable,
            DayClassification::Neutral,
        ]
        .into_iter()
        .map(CellStyle::for_classification)
        .collect();

        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a.background, b.background);
            }
        }
    }
}
