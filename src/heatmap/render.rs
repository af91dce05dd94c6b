//! Heatmap element renderer

use super::simulation::HeatmapGrid;
use crate::dom::Element;
use crate::labels::Labels;

/// Clear `container` and render one block per year, one column per month
pub fn render_heatmap(container: &mut Element, grid: &HeatmapGrid, labels: &Labels) {
    container.clear();

    for year in &grid.years {
        let mut months = Element::div("heatmap-months");

        for month in &year.months {
            let name = labels.month_short(month.month);
            let tooltip = format!("{} {}", name, year.year);

            let mut days = Element::div("heatmap-days");
            for cell in &month.cells {
                days.append(
                    Element::div("heatmap-cell")
                        .class(cell.outcome.to_string())
                        .title(tooltip.as_str()),
                );
            }

            months.append(
                Element::div("heatmap-month")
                    .child(Element::div("heatmap-month-label").text(name))
                    .child(days),
            );
        }

        container.append(
            Element::div("heatmap-year")
                .child(Element::div("heatmap-year-label").text(year.year.to_string()))
                .child(months),
        );
    }

    tracing::debug!(years = grid.years.len(), "Rendered heatmap");
}
