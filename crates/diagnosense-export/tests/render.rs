use diagnosense_core::disease::DiseaseId;
use diagnosense_core::models::outcome::{ErrorState, Outcome};
use diagnosense_core::models::prediction::{DiagnosisReport, PredictionResult};
use diagnosense_export::styles::ChartStyles;
use diagnosense_export::{html, text};
use serde_json::json;

fn prediction(model: &str, label: &str, positive: f64, negative: f64) -> PredictionResult {
    PredictionResult {
        model: model.into(),
        label: label.into(),
        probability_positive: positive,
        probability_negative: negative,
    }
}

fn pneumonia_report() -> DiagnosisReport {
    DiagnosisReport::new(
        DiseaseId::Pneumonia,
        vec![
            prediction("Random Forest", "PNEUMONIA", 0.91, 0.09),
            prediction("KNN", "PNEUMONIA", 0.64, 0.36),
            prediction("XGBoost", "NORMAL", 0.42, 0.58),
        ],
        "PNEUMONIA",
    )
}

#[test]
fn positive_vote_gets_positive_verdict_banner() {
    let disease = DiseaseId::Pneumonia.profile();
    let out = html::render_report(disease, &pneumonia_report(), &ChartStyles::default()).unwrap();

    assert!(out.contains(r#"class="final-verdict result-positive""#));
    assert!(out.contains("Final Diagnosis: PNEUMONIA"));
    assert_eq!(out.matches("prediction-card").count(), 3);
}

#[test]
fn cards_follow_declared_model_order_with_two_decimals() {
    let disease = DiseaseId::Pneumonia.profile();
    let out = html::render_report(disease, &pneumonia_report(), &ChartStyles::default()).unwrap();

    let rf = out.find("Random Forest").unwrap();
    let knn = out.find("KNN").unwrap();
    let xgb = out.find("XGBoost").unwrap();
    assert!(rf < knn && knn < xgb);

    assert!(out.contains("PNEUMONIA: 91.00%"));
    assert!(out.contains("NORMAL: 9.00%"));
    assert!(out.contains(r#"prediction-result result-negative">NORMAL"#));
}

#[test]
fn negative_vote_gets_negative_banner() {
    let disease = DiseaseId::ProstateCancer.profile();
    let report = DiagnosisReport::new(
        DiseaseId::ProstateCancer,
        vec![
            prediction("Logistic Regression", "Non-Cancer", 0.2, 0.8),
            prediction("XGBoost", "Cancer", 0.6, 0.4),
            prediction("Random Forest", "Non-Cancer", 0.3, 0.7),
        ],
        "Non-Cancer",
    );
    let out = html::render_report(disease, &report, &ChartStyles::default()).unwrap();

    assert!(out.contains(r#"class="final-verdict result-negative""#));
    assert!(out.contains("Final Diagnosis: Non-Cancer"));
}

#[test]
fn charts_carry_one_group_and_one_spoke_per_model() {
    let disease = DiseaseId::Pneumonia.profile();
    let out = html::render_report(disease, &pneumonia_report(), &ChartStyles::default()).unwrap();

    // Two bars per model.
    assert_eq!(out.matches("<rect ").count(), 6);
    assert_eq!(out.matches(r#"class="radar-series""#).count(), 2);
    assert!(out.contains("#D2042D"));
    assert!(out.contains("#228B22"));
}

#[test]
fn rendering_is_idempotent() {
    let disease = DiseaseId::Pneumonia.profile();
    let outcome = Outcome::Report(pneumonia_report());
    let styles = ChartStyles::default();

    let first = html::render_page(disease, &outcome, &styles).unwrap();
    let second = html::render_page(disease, &outcome, &styles).unwrap();
    assert_eq!(first, second);
}

#[test]
fn error_renders_alert_without_cards() {
    let disease = DiseaseId::ProstateCancer.profile();
    let outcome = Outcome::Error(ErrorState::new("Please upload a CSV file first."));
    let out = html::render_page(disease, &outcome, &ChartStyles::default()).unwrap();

    assert!(out.contains("alert-danger"));
    assert!(out.contains("Please upload a CSV file first."));
    assert!(!out.contains(r#"class="prediction-card""#));
    assert!(!out.contains(r#"class="final-verdict"#));
    assert!(!out.contains("<pre"));
}

#[test]
fn server_payload_is_escaped() {
    let error = ErrorState::with_payload("bad input", json!({"error": "<script>alert(1)</script>"}));
    let out = html::render_error(&error).unwrap();

    assert!(out.contains("<pre"));
    assert!(out.contains("&lt;script&gt;"));
    assert!(!out.contains("<script>"));
}

#[test]
fn page_has_title_and_unescaped_body() {
    let disease = DiseaseId::ChronicKidney.profile();
    let outcome = Outcome::Error(ErrorState::new("Request failed with status code 500"));
    let out = html::render_page(disease, &outcome, &ChartStyles::default()).unwrap();

    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains(r#"<div class="alert alert-danger">"#));
}

#[test]
fn text_report_lists_models_and_verdict() {
    let disease = DiseaseId::Pneumonia.profile();
    let out = text::render_outcome(disease, &Outcome::Report(pneumonia_report()));

    assert!(out.contains("[+] Random Forest"));
    assert!(out.contains("[-] XGBoost"));
    assert!(out.contains("PNEUMONIA: 91.00%   NORMAL: 9.00%"));
    assert!(out.contains("[+] Final Diagnosis: PNEUMONIA"));
}

#[test]
fn text_error_includes_payload() {
    let disease = DiseaseId::ProstateCancer.profile();
    let error = ErrorState::with_payload("Empty CSV file", json!({"error": "Empty CSV file"}));
    let out = text::render_outcome(disease, &Outcome::Error(error));

    assert!(out.starts_with("[!] Empty CSV file\n"));
    assert!(out.contains(r#""error": "Empty CSV file""#));
    assert!(!out.contains("Final Diagnosis"));
}

#[test]
fn text_report_draws_both_series_for_every_model() {
    let disease = DiseaseId::Pneumonia.profile();
    let out = text::render_report(disease, &pneumonia_report());

    let positive_bars = out.lines().filter(|l| l.starts_with("  PNEUMONIA ")).count();
    let negative_bars = out.lines().filter(|l| l.starts_with("  NORMAL ")).count();
    assert_eq!((positive_bars, negative_bars), (3, 3));
    assert!(out.contains(" 91.00%"));
    assert!(out.ends_with("%\n"));
}
