//! Report Builder
//! Turns a dropdown selection into the ordered set of chart-ready aggregate tables.

use super::selection::{ReportType, Selection};
use super::ReportError;
use crate::config::{DashboardConfig, Rgb};
use crate::data::{columns, DataProcessor, SalesTable};
use crate::stats::{AggregateTable, Aggregation, StatsCalculator};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub table: AggregateTable,
    /// One color per row for bar and pie charts, a single series color for lines.
    pub colors: Vec<Rgb>,
}

impl ChartSpec {
    /// Color of the row at `index`, falling back to the first color.
    pub fn color_at(&self, index: usize) -> Rgb {
        self.colors
            .get(index)
            .or_else(|| self.colors.first())
            .copied()
            .unwrap_or(Rgb::SERIES)
    }
}

/// Output of one selection: which report ran and its charts, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub report: ReportType,
    /// Year the yearly charts were filtered by; `None` for the recession report.
    pub year: Option<i64>,
    pub year_selector_disabled: bool,
    pub charts: Vec<ChartSpec>,
}

/// Pure `(Selection) -> DashboardView` over an immutable table and configuration.
pub struct ReportBuilder<'a> {
    table: &'a SalesTable,
    config: &'a DashboardConfig,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(table: &'a SalesTable, config: &'a DashboardConfig) -> Self {
        Self { table, config }
    }

    pub fn build(&self, selection: &Selection) -> Result<DashboardView, ReportError> {
        match selection.report {
            ReportType::Recession => self.recession_report(),
            ReportType::Yearly => {
                let year = selection.year.unwrap_or(self.config.default_year);
                if !self.config.is_selectable_year(year) {
                    return Err(ReportError::YearOutOfRange {
                        year,
                        first: *self.config.years.start(),
                        last: *self.config.years.end(),
                    });
                }
                self.yearly_report(year)
            }
        }
    }

    /// Average sales per year and per vehicle type over recession rows.
    pub fn recession_report(&self) -> Result<DashboardView, ReportError> {
        let recession = DataProcessor::recession_rows(self.table)?;

        let by_year = StatsCalculator::group_aggregate(
            &recession,
            columns::YEAR,
            columns::AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?;
        let by_vehicle = StatsCalculator::group_aggregate_stable(
            &recession,
            columns::VEHICLE_TYPE,
            columns::AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?
        .reordered(&self.config.vehicle_type_order);

        let charts = vec![
            line_chart(
                "recession-yearly-average",
                "Average Automobile Sales fluctuation over Recession Period".to_string(),
                by_year,
            ),
            self.palette_chart(
                "recession-vehicle-average",
                ChartKind::Bar,
                "Average Number of Vehicles Sold by Vehicle Type during Recession Period"
                    .to_string(),
                by_vehicle,
            ),
        ];

        Ok(DashboardView {
            report: ReportType::Recession,
            year: None,
            year_selector_disabled: !ReportType::Recession.uses_year(),
            charts,
        })
    }

    /// Whole-history trend plus monthly, vehicle type and advertising totals for `year`.
    ///
    /// The first chart always covers every year in the dataset.
    pub fn yearly_report(&self, year: i64) -> Result<DashboardView, ReportError> {
        let all_rows = self.table.dataframe();
        let year_rows = DataProcessor::rows_for_year(self.table, year)?;

        let history = StatsCalculator::group_aggregate(
            all_rows,
            columns::YEAR,
            columns::AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?;
        let monthly = StatsCalculator::group_aggregate_stable(
            &year_rows,
            columns::MONTH,
            columns::AUTOMOBILE_SALES,
            Aggregation::Sum,
        )?
        .reordered(&self.config.month_order);
        let by_vehicle = StatsCalculator::group_aggregate_stable(
            &year_rows,
            columns::VEHICLE_TYPE,
            columns::AUTOMOBILE_SALES,
            Aggregation::Sum,
        )?
        .reordered(&self.config.vehicle_type_order);
        let advertising = StatsCalculator::group_aggregate_stable(
            &year_rows,
            columns::VEHICLE_TYPE,
            columns::ADVERTISING_EXPENDITURE,
            Aggregation::Sum,
        )?
        .reordered(&self.config.vehicle_type_order);

        let charts = vec![
            line_chart(
                "yearly-history",
                "Yearly Automobile Sales".to_string(),
                history,
            ),
            line_chart(
                "yearly-monthly-total",
                "Total Monthly Automobile Sales".to_string(),
                monthly,
            ),
            self.palette_chart(
                "yearly-vehicle-total",
                ChartKind::Bar,
                format!("Number of Vehicles Sold by Vehicle Type in {year}"),
                by_vehicle,
            ),
            self.palette_chart(
                "yearly-advertising",
                ChartKind::Pie,
                format!("Total Advertisement Expenditure by Vehicle Type in {year}"),
                advertising,
            ),
        ];

        Ok(DashboardView {
            report: ReportType::Yearly,
            year: Some(year),
            year_selector_disabled: !ReportType::Yearly.uses_year(),
            charts,
        })
    }

    fn palette_chart(
        &self,
        id: &'static str,
        kind: ChartKind,
        title: String,
        table: AggregateTable,
    ) -> ChartSpec {
        let colors = table
            .rows
            .iter()
            .map(|row| self.config.palette.color_for(&row.key))
            .collect();
        ChartSpec {
            id,
            title,
            kind,
            x_label: table.key_column.clone(),
            y_label: table.value_column.clone(),
            table,
            colors,
        }
    }
}

fn line_chart(id: &'static str, title: String, table: AggregateTable) -> ChartSpec {
    ChartSpec {
        id,
        title,
        kind: ChartKind::Line,
        x_label: table.key_column.clone(),
        y_label: table.value_column.clone(),
        table,
        colors: vec![Rgb::SERIES],
    }
}
