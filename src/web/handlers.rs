use super::error::ApiError;
use super::page;
use super::AppState;
use crate::charts::StaticChartRenderer;
use crate::report::{DashboardView, ReportBuilder, Selection};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// Raw dropdown values from the query string; blank means "not chosen".
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    report: Option<String>,
    year: Option<String>,
}

impl ReportQuery {
    fn selection(&self) -> Result<Selection, ApiError> {
        Ok(Selection::from_raw(
            self.report.as_deref(),
            self.year.as_deref(),
        )?)
    }
}

fn build_view(state: &AppState, selection: &Selection) -> Result<DashboardView, ApiError> {
    let view = ReportBuilder::new(&state.table, &state.config).build(selection)?;
    tracing::debug!(
        report = %view.report,
        year = ?view.year,
        charts = view.charts.len(),
        "report computed"
    );
    Ok(view)
}

pub(crate) async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Html<String>, ApiError> {
    let selection = query.selection()?;
    let view = build_view(&state, &selection)?;

    let renderer = StaticChartRenderer::default();
    let charts_svg = view
        .charts
        .iter()
        .map(|chart| renderer.render(chart))
        .collect::<Result<Vec<_>, _>>()?;

    // Keep the last chosen year in the dropdown while the recession report disables it.
    let selected_year = view
        .year
        .or(selection.year)
        .filter(|y| state.config.is_selectable_year(*y))
        .unwrap_or(state.config.default_year);

    Ok(Html(page::render_dashboard(
        &state.config,
        &view,
        selected_year,
        &charts_svg,
    )))
}

pub(crate) async fn report_handler(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DashboardView>, ApiError> {
    let selection = query.selection()?;
    Ok(Json(build_view(&state, &selection)?))
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "rows": state.table.row_count(),
    }))
}
