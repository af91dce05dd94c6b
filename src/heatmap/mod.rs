//! Daily up/down heatmap
//!
//! - **simulation**: probability table, injected random source, grid sampling
//! - **render**: year/month/day element grid

pub mod render;
pub mod simulation;

pub use render::render_heatmap;
pub use simulation::{
    seeded_rng, simulate, ClusterRule, DayOutcome, HeatmapCell, HeatmapConfig, HeatmapGrid,
    HeatmapMonth, HeatmapYear, MonthOverride, RandomSource,
};
