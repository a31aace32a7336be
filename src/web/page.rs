//! Dashboard page markup: the two dropdowns and the chart output region.

use crate::config::DashboardConfig;
use crate::report::{DashboardView, ReportType};
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: system-ui, -apple-system, sans-serif; margin: 0 24px; }
h1 { text-align: center; color: #503D36; font-size: 24px; }
.selector { width: 50%; display: inline-block; padding: 10px; box-sizing: border-box; }
.selector select { width: 100%; padding: 6px; }
.output-container { padding: 10px; display: flex; flex-wrap: wrap; gap: 12px; }
.chart { flex: 1 1 640px; max-width: 660px; }
.empty-note { color: #7f8ba0; font-size: 13px; margin: 0 0 4px 8px; }
";

// A disabled select is left out of the submitted form, so the year dropdown is
// only ever re-enabled here. The server renders it disabled for the recession report.
const SCRIPT: &str = "\
function syncYear() {
  var report = document.getElementById('select-statistics');
  if (report.value === 'Yearly Statistics') {
    document.getElementById('select-year').disabled = false;
  }
}
";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full HTML page for a computed view.
///
/// `selected_year` is the year shown in the year dropdown, kept even while the
/// recession report disables it. `charts_svg` holds one rendered SVG per chart
/// of `view`, in the same order.
pub fn render_dashboard(
    config: &DashboardConfig,
    view: &DashboardView,
    selected_year: i64,
    charts_svg: &[String],
) -> String {
    let mut report_options = String::new();
    for report in ReportType::ALL {
        let selected = if report == view.report { " selected" } else { "" };
        let _ = write!(
            report_options,
            "<option value=\"{label}\"{selected}>{label}</option>",
            label = escape_html(report.label()),
        );
    }

    let mut year_options = String::new();
    for year in config.selectable_years() {
        let selected = if year == selected_year { " selected" } else { "" };
        let _ = write!(year_options, "<option value=\"{year}\"{selected}>{year}</option>");
    }
    let year_disabled = if view.year_selector_disabled {
        " disabled"
    } else {
        ""
    };

    let mut output = String::new();
    for (chart, svg) in view.charts.iter().zip(charts_svg) {
        let _ = write!(output, "<div class=\"chart\" id=\"{}\">", escape_html(chart.id));
        if chart.table.is_empty() {
            output.push_str("<p class=\"empty-note\">No data for this selection.</p>");
        }
        output.push_str(svg);
        output.push_str("</div>");
    }

    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>{STYLE}</style><script>{SCRIPT}</script></head><body>\
<h1>{heading}</h1>\
<form method=\"get\" action=\"/\">\
<div class=\"selector\"><label for=\"select-statistics\">Select Statistics:</label>\
<select id=\"select-statistics\" name=\"report\" onchange=\"syncYear(); this.form.submit()\">{report_options}</select></div>\
<div class=\"selector\"><label for=\"select-year\">Select Year:</label>\
<select id=\"select-year\" name=\"year\" onchange=\"this.form.submit()\"{year_disabled}>{year_options}</select></div>\
</form>\
<div id=\"output-container\" class=\"output-container\">{output}</div>\
</body></html>",
        title = escape_html(&config.title),
        heading = escape_html(&config.heading),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SalesRecord, SalesTable};
    use crate::report::{ReportBuilder, Selection};

    fn view(selection: Selection) -> DashboardView {
        let table = SalesTable::from_records(&[
            SalesRecord::new(2020, "Jan", "Sports", 5.0, 50.0, false),
            SalesRecord::new(2008, "Jan", "Sports", 3.0, 30.0, true),
        ])
        .unwrap();
        ReportBuilder::new(&table, &DashboardConfig::default())
            .build(&selection)
            .unwrap()
    }

    fn fake_svgs(view: &DashboardView) -> Vec<String> {
        view.charts
            .iter()
            .map(|c| format!("<svg data-chart=\"{}\"></svg>", c.id))
            .collect()
    }

    #[test]
    fn yearly_page_has_four_charts_and_enabled_year() {
        let view = view(Selection::yearly(2020));
        let html = render_dashboard(&DashboardConfig::default(), &view, 2020, &fake_svgs(&view));
        assert_eq!(html.matches("class=\"chart\"").count(), 4);
        assert!(html.contains("<option value=\"2020\" selected>2020</option>"));
        assert!(html.contains("<option value=\"Yearly Statistics\" selected>"));
        assert!(!html.contains("onchange=\"this.form.submit()\" disabled"));
        assert!(html.contains("<title>Automobile Statistics Dashboard</title>"));
    }

    #[test]
    fn recession_page_has_two_charts_and_disabled_year() {
        let view = view(Selection::recession());
        let html = render_dashboard(&DashboardConfig::default(), &view, 1995, &fake_svgs(&view));
        assert_eq!(html.matches("class=\"chart\"").count(), 2);
        assert!(html.contains("onchange=\"this.form.submit()\" disabled"));
        assert!(html.contains("<option value=\"1995\" selected>1995</option>"));
    }

    #[test]
    fn report_change_submits_year_instead_of_disabling_it() {
        let view = view(Selection::yearly(2020));
        let html = render_dashboard(&DashboardConfig::default(), &view, 2020, &fake_svgs(&view));
        assert!(html.contains("onchange=\"syncYear(); this.form.submit()\""));
        assert!(html.contains("disabled = false;"));
        assert!(!html.contains("disabled = true"));
        assert!(!html.contains("disabled = report.value"));
    }

    #[test]
    fn year_dropdown_lists_every_selectable_year() {
        let view = view(Selection::yearly(2020));
        let html = render_dashboard(&DashboardConfig::default(), &view, 2020, &fake_svgs(&view));
        assert!(html.contains("<option value=\"1980\">1980</option>"));
        assert!(html.contains("<option value=\"2023\">2023</option>"));
        assert!(!html.contains("<option value=\"2024\">"));
    }

    #[test]
    fn empty_charts_get_a_note() {
        let view = view(Selection::yearly(1980));
        let html = render_dashboard(&DashboardConfig::default(), &view, 1980, &fake_svgs(&view));
        assert_eq!(html.matches("No data for this selection.").count(), 3);
    }

    #[test]
    fn escape_html_escapes_markup() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}
