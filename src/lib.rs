//! # marketcal
//!
//! Market timing widgets rendered to static HTML and SVG: a simulated
//! daily up/down heatmap, an annotated event calendar, a growth comparison
//! chart and a monthly seasonality chart.
//!
//! ## Modules
//!
//! - [`calendar`]: Day Classifier, reference tables and the calendar renderer
//! - [`layout`]: value-to-pixel projection and plot geometry
//! - [`heatmap`]: seeded simulation and the heatmap renderer
//! - [`chart`]: canvas abstraction, SVG backend and both charts
//! - [`dom`]: element tree the renderers write into
//! - [`labels`]: localized label table
//! - [`page`]: one-pass page assembly
//! - [`export`]: CSV / JSON / NDJSON exports
//!
//! ## Quick Start
//!
//! ```rust
//! use marketcal::config::Config;
//! use marketcal::heatmap::seeded_rng;
//! use marketcal::page::Page;
//!
//! let config = Config::default();
//! let page = Page::render(&config, &mut seeded_rng(Some(42)));
//!
//! let html = page.to_html();
//! assert!(html.contains("heatmap-grid"));
//! assert!(page.output.growth_svg.starts_with("<svg"));
//! ```

pub mod calendar;
pub mod chart;
pub mod config;
pub mod dom;
pub mod error;
pub mod export;
pub mod heatmap;
pub mod labels;
pub mod layout;
pub mod page;

// Re-export top-level types for convenience
pub use calendar::{
    build_calendar, classify, render_calendar, CalendarConfig, CalendarView, DayClassification,
    Event, EventKind, Period,
};

pub use chart::{
    render_growth_chart, render_seasonality_chart, Canvas, GrowthChartConfig, RecordingCanvas,
    SeasonalityChartConfig, SeriesPoint, SvgCanvas,
};

pub use config::{Config, ConfigError, LoggingConfig};

pub use dom::{CellVisualState, Document, Element, HoverEffect};

pub use error::{RenderError, RenderResult};

pub use export::ExportFormat;

pub use heatmap::{render_heatmap, simulate, HeatmapConfig, HeatmapGrid, RandomSource};

pub use labels::{Labels, Locale};

pub use layout::{project, x_for_index, PlotFrame, ValueRange};

pub use page::{render_all, Page};
