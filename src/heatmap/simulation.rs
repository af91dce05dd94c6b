//! Heatmap simulation
//!
//! Samples one up/down outcome per trading day from a configurable
//! probability table. This is a presentation-layer simulation, not market
//! data: the same seed always yields the same grid.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Source of uniform samples in `[0, 1)`
///
/// Implemented for every [`rand::Rng`]; tests can script their own.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Seeded generator, or one seeded from OS entropy when `seed` is `None`
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Probability override for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthOverride {
    /// Zero-based month
    pub month: u32,
    pub probability: f64,
}

/// Mini-rally rule: every `every`-th trading day of the listed months
/// uses `probability`, ahead of any month override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRule {
    #[serde(default = "default_cluster_every")]
    pub every: u32,

    #[serde(default = "default_cluster_months")]
    pub months: Vec<u32>,

    #[serde(default = "default_cluster_probability")]
    pub probability: f64,
}

fn default_cluster_every() -> u32 {
    15
}

fn default_cluster_months() -> Vec<u32> {
    vec![10, 11, 0, 3]
}

fn default_cluster_probability() -> f64 {
    0.85
}

impl Default for ClusterRule {
    fn default() -> Self {
        Self {
            every: default_cluster_every(),
            months: default_cluster_months(),
            probability: default_cluster_probability(),
        }
    }
}

impl ClusterRule {
    pub fn applies(&self, month: u32, day_index: u32) -> bool {
        self.every > 0 && day_index % self.every == 0 && self.months.contains(&month)
    }
}

/// Heatmap simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    #[serde(default = "default_years")]
    pub years: Vec<i32>,

    /// Fixed seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,

    /// Trading days per month, January first
    #[serde(default = "default_trading_days")]
    pub trading_days: Vec<u32>,

    #[serde(default = "default_base_probability")]
    pub base_probability: f64,

    #[serde(default = "default_month_overrides")]
    pub month_overrides: Vec<MonthOverride>,

    #[serde(default)]
    pub cluster: ClusterRule,
}

fn default_years() -> Vec<i32> {
    (2020..=2025).collect()
}

fn default_trading_days() -> Vec<u32> {
    vec![21, 20, 23, 21, 21, 22, 21, 22, 21, 21, 20, 21]
}

fn default_base_probability() -> f64 {
    0.55
}

fn default_month_overrides() -> Vec<MonthOverride> {
    vec![
        MonthOverride { month: 10, probability: 0.73 },
        MonthOverride { month: 11, probability: 0.71 },
        MonthOverride { month: 0, probability: 0.68 },
        MonthOverride { month: 8, probability: 0.45 },
    ]
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            years: default_years(),
            seed: None,
            trading_days: default_trading_days(),
            base_probability: default_base_probability(),
            month_overrides: default_month_overrides(),
            cluster: ClusterRule::default(),
        }
    }
}

impl HeatmapConfig {
    /// Probability that trading day `day_index` (zero-based) of `month` is positive
    pub fn probability_for(&self, month: u32, day_index: u32) -> f64 {
        if self.cluster.applies(month, day_index) {
            return self.cluster.probability;
        }

        self.month_overrides
            .iter()
            .rev()
            .find(|o| o.month == month)
            .map(|o| o.probability)
            .unwrap_or(self.base_probability)
    }

    /// Trading days in `month`, zero when the table is short
    pub fn trading_days_in(&self, month: u32) -> u32 {
        self.trading_days.get(month as usize).copied().unwrap_or(0)
    }

    /// Total number of cells one simulation produces
    pub fn cell_count(&self) -> usize {
        let per_year: u32 = (0..12).map(|m| self.trading_days_in(m)).sum();
        self.years.len() * per_year as usize
    }
}

/// Outcome of one simulated trading day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOutcome {
    Positive,
    Negative,
}

impl std::fmt::Display for DayOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayOutcome::Positive => write!(f, "positive"),
            DayOutcome::Negative => write!(f, "negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// Zero-based trading day within the month
    pub day_index: u32,
    pub outcome: DayOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapMonth {
    /// Zero-based month
    pub month: u32,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapYear {
    pub year: i32,
    pub months: Vec<HeatmapMonth>,
}

/// Simulated grid, ordered year → month → day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub years: Vec<HeatmapYear>,
}

impl HeatmapGrid {
    /// Every cell with its year and month, in draw order
    pub fn cells(&self) -> impl Iterator<Item = (i32, u32, &HeatmapCell)> {
        self.years.iter().flat_map(|y| {
            y.months
                .iter()
                .flat_map(move |m| m.cells.iter().map(move |c| (y.year, m.month, c)))
        })
    }

    pub fn outcomes(&self) -> Vec<DayOutcome> {
        self.cells().map(|(_, _, c)| c.outcome).collect()
    }

    /// Share of positive cells, `None` for an empty grid
    pub fn positive_ratio(&self) -> Option<f64> {
        let (total, positive) = self.cells().fold((0usize, 0usize), |(t, p), (_, _, c)| {
            (t + 1, p + usize::from(c.outcome == DayOutcome::Positive))
        });

        if total == 0 {
            None
        } else {
            Some(positive as f64 / total as f64)
        }
    }
}

/// Sample the whole grid, drawing from `rng` in year → month → day order
pub fn simulate<R: RandomSource + ?Sized>(config: &HeatmapConfig, rng: &mut R) -> HeatmapGrid {
    let years = config
        .years
        .iter()
        .map(|&year| HeatmapYear {
            year,
            months: (0..12)
                .map(|month| HeatmapMonth {
                    month,
                    cells: (0..config.trading_days_in(month))
                        .map(|day_index| {
                            let p = config.probability_for(month, day_index);
                            let outcome = if rng.next_f64() < p {
                                DayOutcome::Positive
                            } else {
                                DayOutcome::Negative
                            };
                            HeatmapCell { day_index, outcome }
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let grid = HeatmapGrid { years };
    tracing::debug!(
        cells = config.cell_count(),
        positive_ratio = grid.positive_ratio().unwrap_or(0.0),
        "Simulated heatmap"
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the same sample
    struct Constant(f64);

    impl RandomSource for Constant {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    /// Counts draws
    struct Counter(usize);

    impl RandomSource for Counter {
        fn next_f64(&mut self) -> f64 {
            self.0 += 1;
            0.0
        }
    }

    #[test]
    fn test_probability_precedence() {
        let config = HeatmapConfig::default();

        assert_eq!(config.probability_for(5, 3), 0.55);
        assert_eq!(config.probability_for(8, 0), 0.45);
        assert_eq!(config.probability_for(10, 1), 0.73);
        // Cluster beats the November override
        assert_eq!(config.probability_for(10, 0), 0.85);
        assert_eq!(config.probability_for(10, 15), 0.85);
        // April has no month override but is a cluster month
        assert_eq!(config.probability_for(3, 15), 0.85);
        assert_eq!(config.probability_for(3, 14), 0.55);
        // September is not a cluster month
        assert_eq!(config.probability_for(8, 15), 0.45);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let config = HeatmapConfig::default();

        let a = simulate(&config, &mut seeded_rng(Some(42)));
        let b = simulate(&config, &mut seeded_rng(Some(42)));
        let c = simulate(&config, &mut seeded_rng(Some(7)));

        assert_eq!(a.outcomes(), b.outcomes());
        assert_ne!(a.outcomes(), c.outcomes());
    }

    #[test]
    fn test_draw_count_and_shape() {
        let config = HeatmapConfig::default();
        let mut counter = Counter(0);
        let grid = simulate(&config, &mut counter);

        assert_eq!(config.cell_count(), 6 * 254);
        assert_eq!(counter.0, config.cell_count());
        assert_eq!(grid.years.len(), 6);
        assert_eq!(grid.years[0].year, 2020);
        assert_eq!(grid.years[0].months[2].cells.len(), 23);
    }

    #[test]
    fn test_only_cluster_days_clear_high_threshold() {
        let config = HeatmapConfig {
            years: vec![2024],
            ..Default::default()
        };
        let grid = simulate(&config, &mut Constant(0.8));

        let positives: Vec<(u32, u32)> = grid
            .cells()
            .filter(|(_, _, c)| c.outcome == DayOutcome::Positive)
            .map(|(_, m, c)| (m, c.day_index))
            .collect();

        assert_eq!(
            positives,
            vec![(0, 0), (0, 15), (3, 0), (3, 15), (10, 0), (10, 15), (11, 0), (11, 15)]
        );
    }

    #[test]
    fn test_short_trading_day_table() {
        let config = HeatmapConfig {
            years: vec![2024],
            trading_days: vec![5, 5],
            ..Default::default()
        };
        let grid = simulate(&config, &mut seeded_rng(Some(1)));

        assert_eq!(grid.years[0].months.len(), 12);
        assert_eq!(grid.cells().count(), 10);
        assert!(grid.years[0].months[5].cells.is_empty());
    }

    #[test]
    fn test_empty_grid_ratio() {
        let config = HeatmapConfig {
            years: vec![],
            ..Default::default()
        };
        let grid = simulate(&config, &mut Constant(0.0));
        assert!(grid.positive_ratio().is_none());
    }
}
