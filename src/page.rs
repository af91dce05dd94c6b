//! Page assembly
//!
//! [`render_all`] is the "content ready" entry point: it fills every known
//! container of a [`Document`] in one pass. [`Page`] wraps the result into a
//! standalone HTML file plus the two chart SVGs.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::calendar::{build_calendar, render_calendar, CalendarView, CellStyle, DayClassification};
use crate::chart::{render_growth_chart, render_seasonality_chart, SvgCanvas};
use crate::config::Config;
use crate::dom::{escape, Document, Element, HoverEffect};
use crate::error::RenderResult;
use crate::heatmap::{render_heatmap, simulate, HeatmapGrid, RandomSource};
use crate::labels::{Labels, Locale};

pub const HEATMAP_CONTAINER: &str = "heatmap-grid";
pub const GROWTH_CONTAINER: &str = "dca-chart";
pub const SEASONALITY_CONTAINER: &str = "seasonality-chart";

pub fn calendar_container(year: i32) -> String {
    format!("calendar-{}-grid", year)
}

/// Data produced by one render pass
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub heatmap: HeatmapGrid,
    pub calendar: CalendarView,
    pub growth_svg: String,
    pub seasonality_svg: String,
}

/// Render every widget into its container
///
/// Containers missing from `document` are skipped. The heatmap is still
/// simulated so the random stream is consumed identically either way.
pub fn render_all<R: RandomSource + ?Sized>(
    document: &mut Document,
    config: &Config,
    rng: &mut R,
) -> RenderOutput {
    let labels = config.labels.build();
    let frame = config.output.frame();

    let heatmap = simulate(&config.heatmap, rng);
    render_into(document, HEATMAP_CONTAINER, |c| render_heatmap(c, &heatmap, &labels));

    let calendar = build_calendar(config.calendar.year, &config.calendar.tables);
    render_into(document, &calendar_container(calendar.year), |c| {
        render_calendar(c, &calendar, &labels)
    });

    let mut growth = SvgCanvas::new(frame);
    render_growth_chart(&mut growth, &frame, &config.growth, &labels);
    let growth_svg = growth.finish();
    render_into(document, GROWTH_CONTAINER, |c| embed_svg(c, &growth_svg));

    let mut seasonality = SvgCanvas::new(frame);
    render_seasonality_chart(&mut seasonality, &frame, &config.seasonality, &labels);
    let seasonality_svg = seasonality.finish();
    render_into(document, SEASONALITY_CONTAINER, |c| embed_svg(c, &seasonality_svg));

    tracing::info!(
        cells = heatmap.cells().count(),
        calendar_year = calendar.year,
        "Rendered page widgets"
    );

    RenderOutput {
        heatmap,
        calendar,
        growth_svg,
        seasonality_svg,
    }
}

fn render_into<F>(document: &mut Document, id: &str, render: F)
where
    F: FnOnce(&mut Element),
{
    match document.get_element_by_id_mut(id) {
        Some(container) => render(container),
        None => tracing::debug!(container = id, "Container not found, skipping"),
    }
}

fn embed_svg(container: &mut Element, svg: &str) {
    container.clear();
    container.append_raw(svg);
}

/// A fully rendered landing page
#[derive(Debug, Clone)]
pub struct Page {
    pub document: Document,
    pub output: RenderOutput,
    labels: Labels,
}

impl Page {
    /// Document with all four containers for `calendar_year`
    pub fn default_document(calendar_year: i32) -> Document {
        let calendar = calendar_container(calendar_year);
        let mut document = Document::with_containers(&[HEATMAP_CONTAINER, calendar.as_str()]);
        for id in [GROWTH_CONTAINER, SEASONALITY_CONTAINER] {
            document.insert(Element::new("div").id(id).class("chart").attr("role", "img"));
        }
        document
    }

    pub fn render<R: RandomSource + ?Sized>(config: &Config, rng: &mut R) -> Self {
        let mut document = Self::default_document(config.calendar.year);
        let output = render_all(&mut document, config, rng);

        Self {
            document,
            output,
            labels: config.labels.build(),
        }
    }

    /// Standalone HTML page
    pub fn to_html(&self) -> String {
        let lang = match self.labels.locale() {
            Locale::Ro => "ro",
            Locale::En => "en",
        };
        let title = escape(self.labels.get("page.title"));

        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html lang=\"{}\">", lang);
        let _ = writeln!(html, "<head>");
        let _ = writeln!(html, "<meta charset=\"utf-8\">");
        let _ = writeln!(
            html,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        );
        let _ = writeln!(html, "<title>{}</title>", title);
        let _ = writeln!(html, "<style>\n{}</style>", stylesheet());
        let _ = writeln!(html, "</head>");
        let _ = writeln!(html, "<body>");
        let _ = writeln!(html, "<header class=\"hero\">");
        let _ = writeln!(html, "<h1>{}</h1>", title);
        let _ = writeln!(html, "<p>{}</p>", escape(self.labels.get("page.tagline")));
        let _ = writeln!(html, "</header>");

        for container in self.document.containers() {
            let id = container.id.as_deref().unwrap_or_default();
            let _ = writeln!(html, "<section class=\"section\">");
            if let Some(key) = section_key(id) {
                let _ = writeln!(html, "<h2>{}</h2>", escape(self.labels.get(key)));
            }
            html.push_str(&container.to_html());
            html.push('\n');
            if id.starts_with("calendar-") {
                html.push_str(&calendar_legend(&self.labels).to_html());
                html.push('\n');
            }
            let _ = writeln!(html, "</section>");
        }

        let _ = writeln!(html, "</body>");
        let _ = writeln!(html, "</html>");
        html
    }

    /// Write `index.html`, `growth.svg` and `seasonality.svg` into `dir`
    pub fn write_to_dir(&self, dir: &Path) -> RenderResult<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let index = dir.join("index.html");
        std::fs::write(&index, self.to_html())?;
        std::fs::write(dir.join("growth.svg"), &self.output.growth_svg)?;
        std::fs::write(dir.join("seasonality.svg"), &self.output.seasonality_svg)?;

        tracing::info!("Wrote page to {:?}", dir);
        Ok(index)
    }
}

fn section_key(id: &str) -> Option<&'static str> {
    match id {
        HEATMAP_CONTAINER => Some("section.heatmap"),
        GROWTH_CONTAINER => Some("section.growth"),
        SEASONALITY_CONTAINER => Some("section.seasonality"),
        other if other.starts_with("calendar-") => Some("section.calendar"),
        _ => None,
    }
}

fn calendar_legend(labels: &Labels) -> Element {
    let mut legend = Element::div("calendar-legend");

    for classification in [
        DayClassification::Favorable,
        DayClassification::Caution,
        DayClassification::Event,
    ] {
        let style = CellStyle::for_classification(classification);
        legend.append(
            Element::div("legend-item")
                .child(Element::new("span").class("legend-swatch").style("background", style.background))
                .child(Element::new("span").text(labels.classification(classification))),
        );
    }

    legend
}

fn stylesheet() -> String {
    let mut css = String::from(
        r#":root {
  --navy-deep: #0a1628;
  --navy: #132642;
  --emerald: #10b981;
  --coral: #f87171;
  --white: #ffffff;
  --gray-400: #9ca3af;
}
body { margin: 0; background: var(--navy-deep); color: var(--white); font-family: "DM Sans", sans-serif; }
.hero, .section { max-width: 1100px; margin: 0 auto; padding: 3rem 1.5rem; }
.heatmap-year { display: flex; align-items: center; gap: 1rem; margin-bottom: 0.75rem; }
.heatmap-year-label { width: 3rem; font-weight: 700; }
.heatmap-months { display: grid; grid-template-columns: repeat(12, 1fr); gap: 6px; flex: 1; }
.heatmap-month-label { font-size: 0.7rem; color: var(--gray-400); }
.heatmap-days { display: flex; flex-wrap: wrap; gap: 2px; }
.heatmap-cell { width: 8px; height: 8px; border-radius: 2px; position: relative; transition: transform 0.15s; }
.heatmap-cell.positive { background: var(--emerald); }
.heatmap-cell.negative { background: var(--coral); }
.calendar-month-header { font-weight: 700; margin-bottom: 0.5rem; }
.calendar-day { padding: 4px 0; text-align: center; border-radius: 4px; font-size: 0.8rem; position: relative; transition: transform 0.15s; }
.calendar-legend { display: flex; gap: 1.5rem; flex-wrap: wrap; }
.legend-item { display: flex; align-items: center; gap: 0.5rem; font-size: 0.85rem; }
.legend-swatch { width: 14px; height: 14px; border-radius: 3px; display: inline-block; }
.chart { background: var(--white); border-radius: 12px; padding: 1rem; overflow-x: auto; }
"#,
    );

    css.push_str(&HoverEffect::HEATMAP.css_rule(".heatmap-cell"));
    css.push('\n');
    css.push_str(&HoverEffect::CALENDAR.css_rule(".calendar-day"));
    css.push('\n');
    css
}
