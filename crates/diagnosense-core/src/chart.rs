//! Chart data shaping.
//!
//! Reshapes a [`DiagnosisReport`] into the record arrays consumed by the
//! grouped bar chart and the radar chart. Values are percentages at full
//! precision; rounding happens only when formatting for display.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::disease::{Disease, OutcomeLabels};
use crate::models::prediction::DiagnosisReport;

/// Fixed radial domain of the radar chart.
pub const RADAR_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Which key names a record's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKey {
    /// Bar charts key their category as `model`.
    Model,
    /// Radar charts key their category as `subject`.
    Subject,
}

impl CategoryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Model => "model",
            CategoryKey::Subject => "subject",
        }
    }
}

/// One chart record: a model and its two outcome percentages.
///
/// Serializes as `{"model": .., "<positive>": .., "<negative>": ..}` (or
/// `subject` for the radar chart), keyed by the disease's outcome names.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRecord {
    pub key: CategoryKey,
    pub category: String,
    pub outcomes: OutcomeLabels,
    pub positive: f64,
    pub negative: f64,
}

impl ChartRecord {
    pub fn total(&self) -> f64 {
        self.positive + self.negative
    }
}

impl Serialize for ChartRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.key.as_str(), &self.category)?;
        map.serialize_entry(self.outcomes.positive, &self.positive)?;
        map.serialize_entry(self.outcomes.negative, &self.negative)?;
        map.end()
    }
}

/// Both chart datasets for one report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartData {
    pub bar: Vec<ChartRecord>,
    pub radar: Vec<ChartRecord>,
}

fn records(
    disease: &dyn Disease,
    report: &DiagnosisReport,
    key: CategoryKey,
) -> Vec<ChartRecord> {
    let outcomes = disease.outcomes();
    disease
        .model_order()
        .iter()
        .filter_map(|model| report.prediction(model))
        .map(|p| ChartRecord {
            key,
            category: p.model.clone(),
            outcomes,
            positive: p.positive_percent(),
            negative: p.negative_percent(),
        })
        .collect()
}

/// One record per declared model, keyed by `model`, for the bar chart.
pub fn bar_records(disease: &dyn Disease, report: &DiagnosisReport) -> Vec<ChartRecord> {
    records(disease, report, CategoryKey::Model)
}

/// The same records keyed by `subject`, for the radar chart.
pub fn radar_records(disease: &dyn Disease, report: &DiagnosisReport) -> Vec<ChartRecord> {
    records(disease, report, CategoryKey::Subject)
}

pub fn chart_data(disease: &dyn Disease, report: &DiagnosisReport) -> ChartData {
    ChartData {
        bar: bar_records(disease, report),
        radar: radar_records(disease, report),
    }
}

/// Format a percentage with two decimals, e.g. `91.00`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}
