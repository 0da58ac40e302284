//! HTML rendering via Tera.
//!
//! Output mirrors the intake pages' result section: one card per model, a
//! final-verdict banner, a grouped bar chart and a radar chart, or an alert
//! block when the submission failed.

use diagnosense_core::chart::{bar_records, format_percent, radar_records};
use diagnosense_core::disease::Disease;
use diagnosense_core::models::outcome::{ErrorState, Outcome};
use diagnosense_core::models::prediction::DiagnosisReport;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::styles::ChartStyles;
use crate::svg::{self, BarChart, RadarChart};

const RESULTS_TEMPLATE: &str = r##"<div class="results-container">
  <h2 class="results-title">Analysis Results</h2>
{% for card in cards %}
  <div class="prediction-card">
    <h3 class="prediction-title">{{ card.model }}</h3>
    <div><span class="prediction-result {{ card.badge_class }}">{{ card.label }}</span></div>
    <div class="probability-details">
      <div>{{ card.positive_name }}: {{ card.positive_percent }}%</div>
      <div>{{ card.negative_name }}: {{ card.negative_percent }}%</div>
    </div>
  </div>
{% endfor %}
  <div class="final-verdict {{ verdict.badge_class }}">Final Diagnosis: {{ verdict.label }}</div>

  <div class="chart-container">
    <h2 class="results-title">Model Prediction Probabilities</h2>
    <svg class="bar-chart" xmlns="http://www.w3.org/2000/svg" width="{{ bar.width }}" height="{{ bar.height }}" viewBox="0 0 {{ bar.width }} {{ bar.height }}">
{% for tick in bar.ticks %}
      <line x1="{{ bar.plot_left }}" x2="{{ bar.plot_right }}" y1="{{ tick.y }}" y2="{{ tick.y }}" stroke="#ccc" stroke-dasharray="3 3"/>
      <text x="{{ bar.plot_left }}" y="{{ tick.y }}" dx="-6" text-anchor="end" font-size="11">{{ tick.label }}</text>
{% endfor %}
{% for group in bar.groups %}
{% for b in group.bars %}
      <rect x="{{ b.x }}" y="{{ b.y }}" width="{{ b.width }}" height="{{ b.height }}" fill="{{ b.color }}"><title>{{ group.label }}: {{ b.value }}%</title></rect>
{% endfor %}
      <text x="{{ group.label_x }}" y="{{ bar.label_y }}" text-anchor="middle" font-size="12">{{ group.label }}</text>
{% endfor %}
    </svg>
    <ul class="chart-legend">
{% for entry in bar.legend %}
      <li><span class="swatch" style="background: {{ entry.color }}"></span>{{ entry.name }}</li>
{% endfor %}
    </ul>
  </div>

  <div class="chart-container">
    <h2 class="results-title">Radar Chart Comparison</h2>
    <svg class="radar-chart" xmlns="http://www.w3.org/2000/svg" width="{{ radar.size }}" height="{{ radar.size }}" viewBox="0 0 {{ radar.size }} {{ radar.size }}">
{% for ring in radar.rings %}
      <polygon points="{{ ring }}" fill="none" stroke="#ccc"/>
{% endfor %}
{% for axis in radar.axes %}
      <line x1="{{ radar.cx }}" y1="{{ radar.cy }}" x2="{{ axis.x }}" y2="{{ axis.y }}" stroke="#ccc"/>
      <text x="{{ axis.label_x }}" y="{{ axis.label_y }}" text-anchor="middle" font-size="12">{{ axis.label }}</text>
{% endfor %}
{% for s in radar.series %}
      <polygon class="radar-series" points="{{ s.points }}" stroke="{{ s.color }}" fill="{{ s.color }}" fill-opacity="{{ radar.fill_opacity }}"><title>{{ s.name }}</title></polygon>
{% endfor %}
    </svg>
    <ul class="chart-legend">
{% for entry in radar.legend %}
      <li><span class="swatch" style="background: {{ entry.color }}"></span>{{ entry.name }}</li>
{% endfor %}
    </ul>
  </div>
</div>
"##;

const ERROR_TEMPLATE: &str = r##"<div class="alert alert-danger">
  <h4>Error</h4>
  <p>{{ message }}</p>
{% if payload %}
  <pre class="mt-3 p-3 bg-light">{{ payload }}</pre>
{% endif %}
</div>
"##;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; }
.prediction-card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.prediction-result { padding: 0.2rem 0.6rem; border-radius: 4px; color: #fff; }
.result-positive { background: #D2042D; }
.result-negative { background: #228B22; }
.final-verdict { padding: 1rem; margin: 1.5rem 0; color: #fff; font-weight: bold; border-radius: 8px; }
.alert-danger { background: #f8d7da; color: #721c24; padding: 1rem; border-radius: 8px; }
.chart-legend { list-style: none; display: flex; gap: 1rem; padding: 0; }
.swatch { display: inline-block; width: 12px; height: 12px; margin-right: 4px; }
</style>
</head>
<body>
<h1 class="page-title">{{ title }}</h1>
{{ body | safe }}
</body>
</html>
"##;

#[derive(Debug, Clone, Serialize)]
struct CardView {
    model: String,
    label: String,
    badge_class: &'static str,
    positive_name: &'static str,
    negative_name: &'static str,
    positive_percent: String,
    negative_percent: String,
}

#[derive(Debug, Clone, Serialize)]
struct VerdictView {
    label: String,
    badge_class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ResultsView {
    cards: Vec<CardView>,
    verdict: VerdictView,
    bar: BarChart,
    radar: RadarChart,
}

fn engine() -> Result<Tera, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("results.html", RESULTS_TEMPLATE),
        ("error.html", ERROR_TEMPLATE),
        ("page.html", PAGE_TEMPLATE),
    ])
    .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
    Ok(tera)
}

fn results_view(disease: &dyn Disease, report: &DiagnosisReport, styles: &ChartStyles) -> ResultsView {
    let outcomes = disease.outcomes();
    let cards = disease
        .model_order()
        .iter()
        .filter_map(|model| report.prediction(model))
        .map(|p| CardView {
            model: p.model.clone(),
            label: p.label.clone(),
            badge_class: disease.badge_class(&p.label),
            positive_name: outcomes.positive,
            negative_name: outcomes.negative,
            positive_percent: format_percent(p.positive_percent()),
            negative_percent: format_percent(p.negative_percent()),
        })
        .collect();

    ResultsView {
        cards,
        verdict: VerdictView {
            label: report.majority_vote_label.clone(),
            badge_class: disease.badge_class(&report.majority_vote_label),
        },
        bar: svg::bar_chart(&bar_records(disease, report), styles),
        radar: svg::radar_chart(&radar_records(disease, report), styles),
    }
}

/// Render the results section for a report.
pub fn render_report(
    disease: &dyn Disease,
    report: &DiagnosisReport,
    styles: &ChartStyles,
) -> Result<String, ExportError> {
    let view = results_view(disease, report, styles);
    let context = Context::from_serialize(&view)?;
    Ok(engine()?.render("results.html", &context)?)
}

/// Render the alert block for an error, with the server payload
/// pretty-printed when there is one.
pub fn render_error(error: &ErrorState) -> Result<String, ExportError> {
    let payload = error
        .raw_server_payload
        .as_ref()
        .map(serde_json::to_string_pretty)
        .transpose()?;

    let mut context = Context::new();
    context.insert("message", &error.message);
    context.insert("payload", &payload);
    Ok(engine()?.render("error.html", &context)?)
}

/// Render a standalone HTML page for whatever a submission settled on.
pub fn render_page(
    disease: &dyn Disease,
    outcome: &Outcome,
    styles: &ChartStyles,
) -> Result<String, ExportError> {
    let body = match outcome {
        Outcome::Report(report) => render_report(disease, report, styles)?,
        Outcome::Error(error) => render_error(error)?,
    };

    let mut context = Context::new();
    context.insert("title", disease.title());
    context.insert("body", &body);
    let page = engine()?.render("page.html", &context)?;

    tracing::debug!(disease = %disease.id(), bytes = page.len(), "rendered HTML page");
    Ok(page)
}
