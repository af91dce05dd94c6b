//! Flat exports of the heatmap grid and the calendar view
//!
//! Supports CSV, pretty JSON arrays and newline-delimited JSON.

use serde::Serialize;

use crate::calendar::{CalendarView, DayClassification, EventKind};
use crate::error::RenderResult;
use crate::heatmap::{DayOutcome, HeatmapGrid};

/// Export encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Csv,
    Json,
    #[default]
    Ndjson,
}

impl ExportFormat {
    /// Case-insensitive; anything unrecognised is NDJSON
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "csv" => ExportFormat::Csv,
            "json" => ExportFormat::Json,
            _ => ExportFormat::Ndjson,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// One heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapRecord {
    pub year: i32,
    /// Zero-based month
    pub month: u32,
    pub day_index: u32,
    pub outcome: DayOutcome,
}

/// One calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalendarRecord {
    pub year: i32,
    /// Zero-based month
    pub month: u32,
    pub day: u32,
    pub classification: DayClassification,
    pub event: Option<EventKind>,
}

pub fn heatmap_records(grid: &HeatmapGrid) -> Vec<HeatmapRecord> {
    grid.cells()
        .map(|(year, month, cell)| HeatmapRecord {
            year,
            month,
            day_index: cell.day_index,
            outcome: cell.outcome,
        })
        .collect()
}

pub fn calendar_records(view: &CalendarView) -> Vec<CalendarRecord> {
    view.days()
        .map(|(month, day)| CalendarRecord {
            year: view.year,
            month,
            day: day.day,
            classification: day.classification,
            event: day.event,
        })
        .collect()
}

pub fn export_heatmap(grid: &HeatmapGrid, format: ExportFormat) -> RenderResult<String> {
    export_records(&heatmap_records(grid), format)
}

pub fn export_calendar(view: &CalendarView, format: ExportFormat) -> RenderResult<String> {
    export_records(&calendar_records(view), format)
}

/// Encode any flat record list
pub fn export_records<T: Serialize>(records: &[T], format: ExportFormat) -> RenderResult<String> {
    match format {
        ExportFormat::Csv => format_csv(records),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Ndjson => format_ndjson(records),
    }
}

fn format_csv<T: Serialize>(records: &[T]) -> RenderResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn format_ndjson<T: Serialize>(records: &[T]) -> RenderResult<String> {
    let mut ndjson = String::new();

    for record in records {
        ndjson.push_str(&serde_json::to_string(record)?);
        ndjson.push('\n');
    }

    Ok(ndjson)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{build_calendar, CalendarConfig};
    use crate::heatmap::{seeded_rng, simulate, HeatmapConfig};

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::parse("CSV"), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("json"), ExportFormat::Json);
        assert_eq!(ExportFormat::parse("ndjson"), ExportFormat::Ndjson);
        assert_eq!(ExportFormat::parse("xml"), ExportFormat::Ndjson);
        assert_eq!("Json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
    }

    #[test]
    fn test_heatmap_csv() {
        let config = HeatmapConfig {
            years: vec![2024],
            ..Default::default()
        };
        let grid = simulate(&config, &mut seeded_rng(Some(7)));
        let csv = export_heatmap(&grid, ExportFormat::Csv).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("year,month,day_index,outcome"));
        assert_eq!(lines.count(), config.cell_count());
        assert!(csv.contains("2024,0,0,"));
    }

    #[test]
    fn test_calendar_ndjson() {
        let view = build_calendar(2026, &CalendarConfig::default());
        let ndjson = export_calendar(&view, ExportFormat::Ndjson).unwrap();

        assert_eq!(ndjson.lines().count(), 365);

        let first: serde_json::Value = serde_json::from_str(ndjson.lines().next().unwrap()).unwrap();
        assert_eq!(first["year"], 2026);
        assert_eq!(first["month"], 0);
        assert_eq!(first["day"], 1);

        let events = ndjson
            .lines()
            .filter(|l| l.contains("\"classification\":\"event\""))
            .count();
        assert_eq!(events, view.count(DayClassification::Event));
    }

    #[test]
    fn test_calendar_json_array() {
        let view = build_calendar(2026, &CalendarConfig::default());
        let json = export_calendar(&view, ExportFormat::Json).unwrap();

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 365);
        assert!(parsed.iter().any(|r| r["event"] == "rate_decision"));
    }

    #[test]
    fn test_empty_exports() {
        let empty = HeatmapGrid { years: vec![] };
        assert_eq!(export_heatmap(&empty, ExportFormat::Ndjson).unwrap(), "");
        assert_eq!(export_heatmap(&empty, ExportFormat::Json).unwrap(), "[]");
    }
}
