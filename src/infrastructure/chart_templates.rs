// Chart templates - bar, bubble and pie pages drawn with Google Charts
use crate::domain::chart::{ChartCatalog, ChartDescriptor, ChartFamily, ChartKey};
use crate::domain::hatchet::SeriesData;
use crate::domain::time_window::TimeWindow;
use crate::infrastructure::http_response::escape_html;
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("chart template {0} not found")]
    NotFound(ChartFamily),
    #[error("{family} cannot render a {series} series")]
    SeriesMismatch {
        family: ChartFamily,
        series: &'static str,
    },
    #[error("failed to encode chart data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything a chart page shows.
#[derive(Debug, Clone, Copy)]
pub struct ChartContext<'a> {
    pub hatchet: &'a str,
    pub series: &'a SeriesData,
    pub chart: &'a ChartDescriptor,
    pub chart_key: ChartKey,
    pub summary: &'a str,
    pub window: &'a TimeWindow,
    pub v_axis_label: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChartTemplate {
    family: ChartFamily,
}

impl ChartTemplate {
    pub fn render(&self, ctx: &ChartContext<'_>) -> Result<String, TemplateError> {
        let (rows, draw) = match (self.family, ctx.series) {
            (ChartFamily::Bubble, SeriesData::OpCounts(ops)) => {
                let seconds = ctx.chart_key == ChartKey::Ops;
                let mut rows = vec![json!(["ID", "date", ctx.v_axis_label.unwrap_or("value"), "op", "count"])];
                rows.extend(ops.iter().map(|op| {
                    let y = if seconds { op.milli / 1000.0 } else { op.count as f64 };
                    let label = format!("{} {}", op.op, op.ns);
                    json!(["", op.date, y, label.trim(), op.count])
                }));
                (rows, "BubbleChart")
            }
            (ChartFamily::Pie, SeriesData::NameValues(pairs)) => {
                let mut rows = vec![json!(["name", "value"])];
                rows.extend(pairs.iter().map(|nv| json!([nv.name, nv.value])));
                (rows, "PieChart")
            }
            (ChartFamily::Bar, SeriesData::Remotes(remotes)) => {
                let mut rows = vec![json!(["remote", "accepted", "ended"])];
                rows.extend(remotes.iter().map(|r| json!([r.value, r.accepted, r.ended])));
                (rows, "BarChart")
            }
            (family, series) => {
                return Err(TemplateError::SeriesMismatch {
                    family,
                    series: series_name(series),
                })
            }
        };

        let options = chart_options(ctx);
        Ok(page(
            ctx,
            self.family,
            &script_json(&Value::Array(rows))?,
            &script_json(&options)?,
            draw,
        ))
    }
}

fn series_name(series: &SeriesData) -> &'static str {
    match series {
        SeriesData::OpCounts(_) => "op counts",
        SeriesData::NameValues(_) => "name/value",
        SeriesData::Remotes(_) => "remote",
    }
}

fn chart_options(ctx: &ChartContext<'_>) -> Value {
    let mut options = json!({
        "title": ctx.chart.title,
        "height": 600,
        "legend": { "position": "right" },
    });
    if let Some(label) = ctx.v_axis_label {
        options["vAxis"] = json!({ "title": label });
        options["hAxis"] = json!({ "title": "date" });
        options["bubble"] = json!({ "textStyle": { "fontSize": 10 } });
    }
    options
}

/// JSON safe to embed inside a `<script>` element.
fn script_json(value: &Value) -> Result<String, TemplateError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn page(ctx: &ChartContext<'_>, family: ChartFamily, rows: &str, options: &str, draw: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{hatchet} - {title}</title>
    <script src="https://www.gstatic.com/charts/loader.js"></script>
    <script>
        google.charts.load('current', {{'packages': ['corechart']}});
        google.charts.setOnLoadCallback(drawChart);
        function drawChart() {{
            var data = google.visualization.arrayToDataTable({rows});
            var chart = new google.visualization.{draw}(document.getElementById('{key}'));
            chart.draw(data, {options});
        }}
    </script>
</head>
<body>
    <h2>{title}</h2>
    <p>{description}</p>
    <div class="window">{start} to {end}</div>
    <div id="{key}" class="{family}"></div>
    <div align="center"><hr/><p/>{summary}</div>
</body>
</html>
"#,
        hatchet = escape_html(ctx.hatchet),
        title = escape_html(&ctx.chart.title),
        description = escape_html(&ctx.chart.description),
        start = escape_html(&ctx.window.start),
        end = escape_html(&ctx.window.end),
        key = ctx.chart_key,
        family = family,
        summary = escape_html(ctx.summary),
        rows = rows,
        options = options,
        draw = draw,
    )
}

/// Templates keyed by chart family, built once at startup.
#[derive(Debug, Clone)]
pub struct ChartTemplates {
    templates: HashMap<ChartFamily, ChartTemplate>,
}

impl ChartTemplates {
    pub fn standard() -> Self {
        Self::with_families(ChartFamily::ALL)
    }

    pub fn with_families(families: impl IntoIterator<Item = ChartFamily>) -> Self {
        Self {
            templates: families
                .into_iter()
                .map(|family| (family, ChartTemplate { family }))
                .collect(),
        }
    }

    pub fn resolve(&self, family: ChartFamily) -> Result<&ChartTemplate, TemplateError> {
        self.templates
            .get(&family)
            .ok_or(TemplateError::NotFound(family))
    }
}

/// Chart selector listing the catalog in display order.
pub fn index_page(hatchet: &str, catalog: &ChartCatalog, summary: &str) -> String {
    let options: Vec<String> = catalog
        .ordered()
        .into_iter()
        .map(|(key, descr)| {
            let value = if descr.route.is_empty() {
                String::new()
            } else {
                format!("/hatchets/{}/charts{}", urlencoding::encode(hatchet), descr.route)
            };
            format!(
                "<option value='{}' title='{}' data-key='{}'>{}</option>",
                escape_html(&value),
                escape_html(&descr.description),
                key,
                escape_html(&descr.title)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{hatchet} - charts</title>
</head>
<body>
    <select id="chart" onchange="if (this.value) {{ window.location.href = this.value; }}">
{options}
    </select>
    <div align="center"><hr/><p/>{summary}</div>
</body>
</html>
"#,
        hatchet = escape_html(hatchet),
        options = options.join("\n"),
        summary = escape_html(summary),
    )
}
