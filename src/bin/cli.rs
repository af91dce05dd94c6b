//! marketcal CLI
//!
//! Command-line interface for marketcal operations:
//! - Render the full page
//! - Simulate and export the heatmap
//! - Build and export the event calendar
//! - Classify a single date
//! - Render one chart to SVG

use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use marketcal::calendar::{build_calendar, CalendarView};
use marketcal::chart::{render_growth_chart, render_seasonality_chart, SvgCanvas};
use marketcal::config::{generate_default_config, Config, ConfigError};
use marketcal::export::{export_calendar, export_heatmap, ExportFormat};
use marketcal::heatmap::{seeded_rng, simulate, DayOutcome, HeatmapGrid};
use marketcal::labels::Labels;
use marketcal::page::Page;

#[derive(Parser)]
#[command(name = "marketcal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Market timing widgets: heatmap, event calendar and charts")]
#[command(long_about = "marketcal renders a simulated up/down heatmap, an annotated event calendar,\na growth comparison chart and a seasonality chart to static HTML and SVG.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv, ndjson)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Enable logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the full page (index.html + chart SVGs)
    Render {
        /// Output directory (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Heatmap seed
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Simulate the heatmap
    Heatmap {
        /// Heatmap seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Years to simulate (default: from config)
        #[arg(short, long)]
        years: Vec<i32>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the classified calendar
    Calendar {
        /// Calendar year (default: from config)
        #[arg(short, long)]
        year: Option<i32>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify one date (YYYY-MM-DD)
    Classify {
        date: String,
    },

    /// Render one chart
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartKind {
    Growth,
    Seasonality,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, load_errors) = load_config(cli.config.as_deref())?;

    if cli.verbose {
        config.logging.init();
    }

    // stderr keeps stdout clean for exports
    for e in &load_errors {
        eprintln!("warning: {}; using the next config location", e);
    }

    let labels = config.labels.build();

    match cli.command {
        Commands::Render { output, seed } => {
            let mut rng = seeded_rng(seed.or(config.heatmap.seed));
            let page = Page::render(&config, &mut rng);

            let dir = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            let index = page
                .write_to_dir(&dir)
                .with_context(|| format!("writing page to {:?}", dir))?;

            println!("Page written to {:?}", index);
            println!(
                "  Heatmap cells: {}",
                page.output.heatmap.cells().count()
            );
            println!("  Calendar year: {}", page.output.calendar.year);
        }

        Commands::Heatmap {
            seed,
            years,
            output,
        } => {
            let mut heatmap_config = config.heatmap.clone();
            if !years.is_empty() {
                heatmap_config.years = years;
            }

            let mut rng = seeded_rng(seed.or(heatmap_config.seed));
            let grid = simulate(&heatmap_config, &mut rng);

            match cli.format.as_str() {
                "table" => print_heatmap_table(&grid, &labels),
                other => {
                    let body = export_heatmap(&grid, ExportFormat::parse(other))?;
                    emit(&body, output.as_deref())?;
                }
            }
        }

        Commands::Calendar { year, output } => {
            let year = year.unwrap_or(config.calendar.year);
            let view = build_calendar(year, &config.calendar.tables);

            match cli.format.as_str() {
                "table" => print_calendar_table(&view, &labels),
                other => {
                    let body = export_calendar(&view, ExportFormat::parse(other))?;
                    emit(&body, output.as_deref())?;
                }
            }
        }

        Commands::Classify { date } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("invalid date {:?}, expected YYYY-MM-DD", date))?;

            let tables = config.calendar.tables.sanitized(date.year());
            let month = date.month0();
            let classification = tables.classify(month, date.day());
            let event = tables.event_on(month, date.day());

            match cli.format.as_str() {
                "json" => {
                    let record = serde_json::json!({
                        "date": date.to_string(),
                        "classification": classification,
                        "event": event,
                    });
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                _ => {
                    println!("{}: {}", date, classification);
                    let label = match event {
                        Some(kind) => labels.event(kind),
                        None => labels.classification(classification),
                    };
                    println!("  {}", label);
                }
            }
        }

        Commands::Chart { kind, output } => {
            let frame = config.output.frame();
            let mut canvas = SvgCanvas::new(frame);

            match kind {
                ChartKind::Growth => {
                    render_growth_chart(&mut canvas, &frame, &config.growth, &labels)
                }
                ChartKind::Seasonality => {
                    render_seasonality_chart(&mut canvas, &frame, &config.seasonality, &labels)
                }
            }

            let body = match cli.format.as_str() {
                "json" => serde_json::to_string_pretty(canvas.ops())?,
                _ => canvas.finish(),
            };
            emit(&body, output.as_deref())?;
        }

        Commands::Config { output } => {
            emit(&generate_default_config(), output.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<(Config, Vec<ConfigError>)> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {:?}", path);
            }
            Ok((Config::load_with_env(path)?, Vec::new()))
        }
        None => {
            let found = Config::discover();
            Ok((found.config, found.errors))
        }
    }
}

/// Write to `output`, or stdout when unset
fn emit(body: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body).with_context(|| format!("writing {:?}", path))?;
            println!("Written to {:?}", path);
        }
        None => print!("{}", body),
    }
    Ok(())
}

fn print_heatmap_table(grid: &HeatmapGrid, labels: &Labels) {
    if grid.years.is_empty() {
        println!("No years configured");
        return;
    }

    print!("{:<6}", "Year");
    for month in 0..12 {
        print!(" {:>5}", labels.month_short(month));
    }
    println!(" {:>7}", "Up%");
    println!("{}", "-".repeat(6 + 12 * 6 + 8));

    for year in &grid.years {
        print!("{:<6}", year.year);
        let mut total = 0usize;
        let mut positive = 0usize;

        for month in &year.months {
            let up = month
                .cells
                .iter()
                .filter(|c| c.outcome == DayOutcome::Positive)
                .count();
            total += month.cells.len();
            positive += up;
            print!(" {:>2}/{:<2}", up, month.cells.len());
        }

        let share = if total == 0 {
            0.0
        } else {
            100.0 * positive as f64 / total as f64
        };
        println!(" {:>6.1}%", share);
    }

    if let Some(ratio) = grid.positive_ratio() {
        println!();
        println!("Overall positive days: {:.1}%", ratio * 100.0);
    }
}

fn print_calendar_table(view: &CalendarView, labels: &Labels) {
    use marketcal::calendar::DayClassification;

    println!("Calendar {}", view.year);
    println!();
    println!(
        "{:<12} {:>6} {:>10} {:>8} {:>8}",
        "Month", "Events", "Favorable", "Caution", "Neutral"
    );
    println!("{}", "-".repeat(48));

    for month in &view.months {
        println!(
            "{:<12} {:>6} {:>10} {:>8} {:>8}",
            labels.month_long(month.month),
            month.count(DayClassification::Event),
            month.count(DayClassification::Favorable),
            month.count(DayClassification::Caution),
            month.count(DayClassification::Neutral)
        );
    }

    let events: Vec<String> = view
        .days()
        .filter_map(|(month, day)| {
            day.event
                .map(|kind| format!("  {} {}: {}", day.day, labels.month_short(month), labels.event(kind)))
        })
        .collect();

    if !events.is_empty() {
        println!();
        println!("Events:");
        for line in events {
            println!("{}", line);
        }
    }
}
