//! Static Chart Renderer
//! Draws a chart spec into a standalone SVG document with plotters.
//!
//! Layout per chart:
//! 1. Title centered at the top
//! 2. Line / bar: mesh with one x tick per category, measure on the y axis
//! 3. Pie: circle on the left, legend with percentages on the right

use super::plotter::ChartPlotter;
use crate::config::Rgb;
use crate::report::{ChartKind, ChartSpec};
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

const TITLE_FONT: (&str, i32) = ("sans-serif", 18);
const LABEL_FONT: (&str, i32) = ("sans-serif", 13);
const MAX_X_LABELS: usize = 12;
const LEGEND_SWATCH: i32 = 12;
const LEGEND_ROW: i32 = 20;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart '{chart}': {message}")]
    Drawing { chart: String, message: String },
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Renders chart specs to SVG strings.
pub struct StaticChartRenderer {
    width: u32,
    height: u32,
}

impl Default for StaticChartRenderer {
    fn default() -> Self {
        Self::new(640, 400)
    }
}

impl StaticChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn render(&self, spec: &ChartSpec) -> Result<String, RenderError> {
        let drawing_err = |e: &dyn std::fmt::Display| RenderError::Drawing {
            chart: spec.id.to_string(),
            message: e.to_string(),
        };

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(|e| drawing_err(&e))?;
            let drawn = match spec.kind {
                ChartKind::Line => Self::draw_line(&root, spec),
                ChartKind::Bar => Self::draw_bar(&root, spec),
                ChartKind::Pie => Self::draw_pie(&root, spec),
            };
            drawn.map_err(|e| drawing_err(&e))?;
            root.present().map_err(|e| drawing_err(&e))?;
        }
        Ok(svg)
    }

    fn draw_line<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let labels: Vec<String> = spec.table.rows.iter().map(|r| r.key.clone()).collect();
        let values = spec.table.values();
        let (x_min, x_max) = ChartPlotter::category_range(values.len());
        let (y_min, y_max) = ChartPlotter::value_range(&values);
        let color = rgb(spec.color_at(0));

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, TITLE_FONT)
            .margin(12)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let format_x = |x: &f64| ChartPlotter::category_label(&labels, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len().clamp(1, MAX_X_LABELS))
            .x_label_formatter(&format_x)
            .x_label_style(LABEL_FONT)
            .y_label_style(LABEL_FONT)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()?;

        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|p| Circle::new(*p, 3, color.filled())),
        )?;
        Ok(())
    }

    fn draw_bar<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let labels: Vec<String> = spec.table.rows.iter().map(|r| r.key.clone()).collect();
        let values = spec.table.values();
        let (x_min, x_max) = ChartPlotter::category_range(values.len());
        let (y_min, y_max) = ChartPlotter::value_range(&values);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, TITLE_FONT)
            .margin(12)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let format_x = |x: &f64| ChartPlotter::category_label(&labels, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len().clamp(1, MAX_X_LABELS))
            .x_label_formatter(&format_x)
            .x_label_style(LABEL_FONT)
            .y_label_style(LABEL_FONT)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, v)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.4, 0.0), (x + 0.4, *v)],
                rgb(spec.color_at(i)).filled(),
            )
        }))?;
        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let area = root.titled(&spec.title, TITLE_FONT)?;
        let (width, height) = area.dim_in_pixel();
        let (width, height) = (width as i32, height as i32);

        let radius = f64::from(width.min(height)) * 0.4;
        let center = (width * 2 / 5, height / 2);
        let values = spec.table.values();

        let slices = ChartPlotter::pie_slices(&values, center, radius);
        for slice in &slices {
            let color = rgb(spec.color_at(slice.index));
            area.draw(&Polygon::new(slice.outline.clone(), color.filled()))?;
        }

        let legend_x = center.0 + radius as i32 + 30;
        let mut legend_y = center.1 - (slices.len() as i32 * LEGEND_ROW) / 2;
        for slice in &slices {
            let color = rgb(spec.color_at(slice.index));
            let key = &spec.table.rows[slice.index].key;
            area.draw(&Rectangle::new(
                [
                    (legend_x, legend_y),
                    (legend_x + LEGEND_SWATCH, legend_y + LEGEND_SWATCH),
                ],
                color.filled(),
            ))?;
            area.draw(&Text::new(
                format!("{} ({:.1}%)", key, slice.fraction * 100.0),
                (legend_x + LEGEND_SWATCH + 6, legend_y),
                LABEL_FONT.into_font(),
            ))?;
            legend_y += LEGEND_ROW;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{AggregateRow, AggregateTable, Aggregation};

    fn spec(kind: ChartKind, rows: &[(&str, f64)]) -> ChartSpec {
        ChartSpec {
            id: "test-chart",
            title: "Total Monthly Automobile Sales".to_string(),
            kind,
            x_label: "Month".to_string(),
            y_label: "Automobile_Sales".to_string(),
            table: AggregateTable {
                key_column: "Month".to_string(),
                value_column: "Automobile_Sales".to_string(),
                aggregation: Aggregation::Sum,
                rows: rows
                    .iter()
                    .map(|(key, value)| AggregateRow {
                        key: key.to_string(),
                        value: *value,
                    })
                    .collect(),
            },
            colors: vec![Rgb(0x00, 0x6B, 0xA4), Rgb(0xFF, 0x80, 0x0E)],
        }
    }

    fn render(spec: &ChartSpec) -> String {
        StaticChartRenderer::default().render(spec).unwrap()
    }

    #[test]
    fn every_kind_renders_an_svg_document() {
        let rows = [("Jan", 15.0), ("Feb", 20.0)];
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie] {
            let svg = render(&spec(kind, &rows));
            assert!(svg.contains("<svg"), "{kind:?} produced no svg element");
            assert!(svg.contains("</svg>"));
            assert!(svg.contains("width=\"640\""));
            assert!(svg.contains("height=\"400\""));
        }
    }

    #[test]
    fn line_and_bar_draw_their_series_color() {
        let rows = [("Jan", 15.0), ("Feb", 20.0)];
        let line = render(&spec(ChartKind::Line, &rows));
        assert!(line.to_ascii_uppercase().contains("#006BA4"));

        let bar = render(&spec(ChartKind::Bar, &rows));
        let upper = bar.to_ascii_uppercase();
        assert!(upper.contains("#006BA4"));
        assert!(upper.contains("#FF800E"));
    }

    #[test]
    fn pie_legend_shows_percentages() {
        let svg = render(&spec(ChartKind::Pie, &[("Sports", 25.0), ("Executivecar", 75.0)]));
        assert!(svg.contains("Sports (25.0%)"));
        assert!(svg.contains("Executivecar (75.0%)"));
    }

    #[test]
    fn empty_tables_render_title_and_axes_only() {
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie] {
            let svg = render(&spec(kind, &[]));
            assert!(svg.contains("<svg"));
            assert!(svg.contains("Total Monthly Automobile Sales"));
        }
    }

    #[test]
    fn pie_without_positive_values_still_renders() {
        let svg = render(&spec(ChartKind::Pie, &[("Sports", 0.0), ("Executivecar", -3.0)]));
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<polygon"));
    }
}
