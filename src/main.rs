//! marketcal
//!
//! Renders the landing page widgets into the configured output directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use marketcal::config::Config;
use marketcal::heatmap::seeded_rng;
use marketcal::page::Page;

#[derive(Parser)]
#[command(name = "marketcal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render the market timing page to static HTML and SVG")]
struct Args {
    /// Config file (default: search the standard locations)
    config: Option<PathBuf>,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, source, load_errors) = match &args.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config {:?}", path))?;
            (config, Some(path.clone()), Vec::new())
        }
        None => {
            let found = Config::discover();
            (found.config, found.source, found.errors)
        }
    };

    config.logging.init();

    // Reported once a subscriber exists
    for e in &load_errors {
        tracing::warn!("{}; falling back to the next config location", e);
    }
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }

    tracing::info!("marketcal v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        seed = ?config.heatmap.seed,
        locale = ?config.labels.locale,
        "Rendering calendar year {}",
        config.calendar.year
    );

    let mut rng = seeded_rng(config.heatmap.seed);
    let page = Page::render(&config, &mut rng);

    let dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));
    let index = page
        .write_to_dir(&dir)
        .with_context(|| format!("writing page to {:?}", dir))?;

    tracing::info!("Page ready at {:?}", index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_positional_config() {
        let args = Args::try_parse_from(["marketcal", "site.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("site.toml")));
        assert!(args.output.is_none());

        let args = Args::try_parse_from(["marketcal", "-o", "public"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.output, Some(PathBuf::from("public")));
    }

    #[test]
    fn test_args_flags_are_not_config_paths() {
        let err = Args::try_parse_from(["marketcal", "--help"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["marketcal", "--version"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        assert!(Args::try_parse_from(["marketcal", "--bogus"]).is_err());
    }
}
