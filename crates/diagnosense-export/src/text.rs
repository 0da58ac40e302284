//! Plain-text rendering for terminals.

use std::fmt;

use diagnosense_core::chart::{bar_records, format_percent};
use diagnosense_core::disease::Disease;
use diagnosense_core::models::outcome::{ErrorState, Outcome};
use diagnosense_core::models::prediction::DiagnosisReport;

const BAR_WIDTH: usize = 40;

fn marker(class: &str) -> &'static str {
    if class == "result-positive" { "[+]" } else { "[-]" }
}

fn ascii_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

struct ReportText<'a> {
    disease: &'a dyn Disease,
    report: &'a DiagnosisReport,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disease = self.disease;
        let outcomes = disease.outcomes();

        writeln!(f, "{}", disease.title())?;
        writeln!(f, "{}", "=".repeat(disease.title().chars().count()))?;
        writeln!(f)?;

        for model in disease.model_order() {
            let Some(p) = self.report.prediction(model) else {
                continue;
            };
            writeln!(f, "{} {}", marker(disease.badge_class(&p.label)), p.model)?;
            writeln!(f, "    {}", p.label)?;
            writeln!(
                f,
                "    {}: {}%   {}: {}%",
                outcomes.positive,
                format_percent(p.positive_percent()),
                outcomes.negative,
                format_percent(p.negative_percent()),
            )?;
        }

        let vote = &self.report.majority_vote_label;
        writeln!(f)?;
        writeln!(f, "{} Final Diagnosis: {vote}", marker(disease.badge_class(vote)))?;
        writeln!(f)?;

        let width = outcomes.positive.len().max(outcomes.negative.len());
        for record in bar_records(disease, self.report) {
            writeln!(f, "{}", record.category)?;
            for (name, value) in [
                (outcomes.positive, record.positive),
                (outcomes.negative, record.negative),
            ] {
                writeln!(
                    f,
                    "  {name:<width$} {} {:>6}%",
                    ascii_bar(value),
                    format_percent(value)
                )?;
            }
        }
        Ok(())
    }
}

struct ErrorText<'a>(&'a ErrorState);

impl fmt::Display for ErrorText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[!] {}", self.0.message)?;
        if let Some(payload) = &self.0.raw_server_payload {
            match serde_json::to_string_pretty(payload) {
                Ok(pretty) => writeln!(f, "{pretty}")?,
                Err(_) => writeln!(f, "{payload}")?,
            }
        }
        Ok(())
    }
}

pub fn render_report(disease: &dyn Disease, report: &DiagnosisReport) -> String {
    ReportText { disease, report }.to_string()
}

pub fn render_error(error: &ErrorState) -> String {
    ErrorText(error).to_string()
}

pub fn render_outcome(disease: &dyn Disease, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Report(report) => render_report(disease, report),
        Outcome::Error(error) => render_error(error),
    }
}
