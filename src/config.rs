//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::calendar::{reference::REFERENCE_YEAR, CalendarConfig};
use crate::chart::{GrowthChartConfig, SeasonalityChartConfig};
use crate::heatmap::HeatmapConfig;
use crate::labels::{Labels, Locale};
use crate::layout::PlotFrame;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub heatmap: HeatmapConfig,

    #[serde(default)]
    pub calendar: CalendarSection,

    #[serde(default)]
    pub growth: GrowthChartConfig,

    #[serde(default)]
    pub seasonality: SeasonalityChartConfig,

    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output location and chart surface size
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,

    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_padding")]
    pub padding: f64,
}

fn default_output_dir() -> String {
    "./site".to_string()
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    500.0
}

fn default_padding() -> f64 {
    60.0
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
        }
    }
}

impl OutputConfig {
    pub fn frame(&self) -> PlotFrame {
        PlotFrame::new(self.width, self.height, self.padding)
    }
}

/// Calendar year plus its period and event tables
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarSection {
    #[serde(default = "default_calendar_year")]
    pub year: i32,

    #[serde(flatten)]
    pub tables: CalendarConfig,
}

fn default_calendar_year() -> i32 {
    REFERENCE_YEAR
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            year: default_calendar_year(),
            tables: CalendarConfig::default(),
        }
    }
}

/// Label locale and per-id overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelsConfig {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

impl LabelsConfig {
    pub fn build(&self) -> Labels {
        Labels::new(self.locale).with_overrides(&self.overrides)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber; `RUST_LOG` wins over the configured level
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("marketcal={}", self.level)));
        let registry = tracing_subscriber::registry().with(filter);

        let result = if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).try_init()
        } else {
            registry.with(tracing_subscriber::fmt::layer()).try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already initialised: {}", e);
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Search the default locations, keeping every load failure
    pub fn discover() -> ConfigSearch {
        Self::discover_in(&default_config_paths())
    }

    /// First of `paths` that exists and loads wins; broken files are
    /// reported in [`ConfigSearch::errors`] and the search moves on
    pub fn discover_in(paths: &[PathBuf]) -> ConfigSearch {
        let mut errors = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigSearch {
                        config,
                        source: Some(path.clone()),
                        errors,
                    };
                }
                Err(e) => errors.push(e),
            }
        }

        tracing::info!("Using default config with environment overrides");
        ConfigSearch {
            config: Self::from_env(),
            source: None,
            errors,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("MARKETCAL_OUTPUT_DIR") {
            self.output.dir = dir;
        }

        if let Some(seed) = lookup("MARKETCAL_SEED") {
            match seed.parse() {
                Ok(seed) => self.heatmap.seed = Some(seed),
                Err(_) => tracing::warn!("Ignoring invalid MARKETCAL_SEED {:?}", seed),
            }
        }

        if let Some(locale) = lookup("MARKETCAL_LOCALE") {
            match locale.parse() {
                Ok(locale) => self.labels.locale = locale,
                Err(_) => tracing::warn!("Ignoring unknown MARKETCAL_LOCALE {:?}", locale),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("MARKETCAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("MARKETCAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of a config file search
#[derive(Debug)]
pub struct ConfigSearch {
    pub config: Config,
    /// File the config came from, `None` for defaults
    pub source: Option<PathBuf>,
    /// Files that exist but failed to load
    pub errors: Vec<ConfigError>,
}

pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("marketcal").join("config.toml"));
    }
    paths.push(PathBuf::from("/etc/marketcal/config.toml"));
    paths.push(PathBuf::from("./marketcal.toml"));
    paths
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# marketcal configuration
#
# Environment variables override these settings:
# - MARKETCAL_OUTPUT_DIR
# - MARKETCAL_SEED
# - MARKETCAL_LOCALE
# - MARKETCAL_LOG_LEVEL
# - MARKETCAL_LOG_FORMAT
#
# Months are zero-based: 0 = January, 11 = December.

[output]
# Directory receiving index.html, growth.svg and seasonality.svg
dir = "./site"

# Chart surface size and plot padding
width = 800
height = 500
padding = 60

[heatmap]
years = [2020, 2021, 2022, 2023, 2024, 2025]

# Fix the seed for reproducible output
# seed = 42

# Trading days per month, January first
trading_days = [21, 20, 23, 21, 21, 22, 21, 22, 21, 21, 20, 21]

# Probability of a positive day when no other rule applies
base_probability = 0.55

month_overrides = [
    { month = 10, probability = 0.73 },
    { month = 11, probability = 0.71 },
    { month = 0, probability = 0.68 },
    { month = 8, probability = 0.45 },
]

[heatmap.cluster]
# Every 15th trading day of these months uses the cluster probability
every = 15
months = [10, 11, 0, 3]
probability = 0.85

[calendar]
year = 2026

# Omitted tables use the built-in 2026 reference data.
# favorable_periods = [{ month = 0, start = 2, end = 10 }]
# caution_periods = [{ month = 8, start = 1, end = 30 }]
# events = [{ month = 0, day = 28, kind = "fomc" }]

[growth]
start_value = 50000
rate_a = 0.123
rate_b = 0.141
period_count = 10
labels = ["2015", "2016", "2017", "2018", "2019", "2020", "2021", "2022", "2023", "2024"]

[seasonality]
# Empty labels use short month names
labels = []
values = [1.2, -0.1, 0.5, 1.2, 0.1, 0.8, 1.7, 0.7, -0.7, 0.5, 1.5, 1.3]
highlighted_indices = [6, 10, 11]

[labels]
# ro or en
locale = "ro"

[labels.overrides]
# "page.title" = "Market Calendar"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventKind;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.dir, "./site");
        assert_eq!(config.output.frame(), PlotFrame::default());
        assert_eq!(config.calendar.year, 2026);
        assert_eq!(config.labels.locale, Locale::Ro);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.heatmap, defaults.heatmap);
        assert_eq!(config.calendar.tables, defaults.calendar.tables);
        assert_eq!(config.growth, defaults.growth);
        assert_eq!(config.seasonality, defaults.seasonality);
        assert_eq!(config.output.frame(), defaults.output.frame());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
[heatmap]
seed = 7
years = [2024]

[calendar]
year = 2027
caution_periods = []
events = [{ month = 2, day = 17, type = "FOMC" }]

[labels]
locale = "en"
"#,
        )
        .unwrap();

        assert_eq!(config.heatmap.seed, Some(7));
        assert_eq!(config.heatmap.years, vec![2024]);
        assert_eq!(config.heatmap.base_probability, 0.55);

        assert_eq!(config.calendar.year, 2027);
        assert!(config.calendar.tables.caution_periods.is_empty());
        assert_eq!(config.calendar.tables.events.len(), 1);
        assert_eq!(config.calendar.tables.events[0].kind, EventKind::RateDecision);
        assert_eq!(
            config.calendar.tables.favorable_periods,
            CalendarConfig::default().favorable_periods
        );

        assert_eq!(config.labels.locale, Locale::En);
        assert_eq!(config.seasonality, SeasonalityChartConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let env: HashMap<&str, &str> = [
            ("MARKETCAL_OUTPUT_DIR", "/tmp/out"),
            ("MARKETCAL_SEED", "99"),
            ("MARKETCAL_LOCALE", "en"),
            ("MARKETCAL_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.output.dir, "/tmp/out");
        assert_eq!(config.heatmap.seed, Some(99));
        assert_eq!(config.labels.locale, Locale::En);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "MARKETCAL_SEED" => Some("not-a-number".to_string()),
            "MARKETCAL_LOCALE" => Some("klingon".to_string()),
            _ => None,
        });

        assert_eq!(config.heatmap.seed, None);
        assert_eq!(config.labels.locale, Locale::Ro);
    }

    #[test]
    fn test_discover_reports_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[heatmap\nseed = ").unwrap();
        std::fs::write(&good, "[calendar]\nyear = 2027\n").unwrap();

        let found = Config::discover_in(&[missing.clone(), broken.clone(), good.clone()]);
        assert_eq!(found.source, Some(good));
        assert_eq!(found.config.calendar.year, 2027);
        assert_eq!(found.errors.len(), 1);
        assert!(matches!(&found.errors[0], ConfigError::Parse { path, .. } if *path == broken));

        // A broken file alone falls back to defaults but is still reported
        let found = Config::discover_in(&[missing, broken]);
        assert_eq!(found.source, None);
        assert_eq!(found.config.calendar.year, 2026);
        assert_eq!(found.errors.len(), 1);
        assert!(found.errors[0].to_string().contains("broken.toml"));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[output\ndir = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[output]\nwidth = 640\n").unwrap();
        assert_eq!(Config::load(&good).unwrap().output.width, 640.0);
    }
}
