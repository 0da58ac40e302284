use diagnosense_core::chart::{bar_records, chart_data, format_percent, radar_records};
use diagnosense_core::disease::{Disease, DiseaseId};
use diagnosense_core::models::prediction::{DiagnosisReport, PredictionResult};

fn ckd_report() -> DiagnosisReport {
    // Stored out of declared order on purpose.
    DiagnosisReport::new(
        DiseaseId::ChronicKidney,
        vec![
            PredictionResult::derived("Random Forest", "There is a high risk of Chronic Kidney Disease", 0.873_456),
            PredictionResult::derived("Logistic Regression", "There is a low risk of Chronic Kidney Disease", 0.123_4),
            PredictionResult::derived("XGBoost", "There is a high risk of Chronic Kidney Disease", 0.666_666),
        ],
        "There is a high risk of Chronic Kidney Disease",
    )
}

#[test]
fn one_record_per_model_in_declared_order() {
    let disease = DiseaseId::ChronicKidney.profile();
    let bars = bar_records(disease, &ckd_report());

    let models: Vec<&str> = bars.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(models, disease.model_order());
}

#[test]
fn positive_and_negative_sum_to_one_hundred() {
    let disease = DiseaseId::ChronicKidney.profile();
    for record in bar_records(disease, &ckd_report()) {
        assert!((record.total() - 100.0).abs() <= 0.01, "{record:?}");
    }

    let pneumonia = DiagnosisReport::new(
        DiseaseId::Pneumonia,
        vec![
            PredictionResult {
                model: "Random Forest".into(),
                label: "PNEUMONIA".into(),
                probability_positive: 0.91,
                probability_negative: 0.09,
            },
            PredictionResult {
                model: "KNN".into(),
                label: "NORMAL".into(),
                probability_positive: 0.333,
                probability_negative: 0.667,
            },
            PredictionResult {
                model: "XGBoost".into(),
                label: "PNEUMONIA".into(),
                probability_positive: 0.5,
                probability_negative: 0.5,
            },
        ],
        "PNEUMONIA",
    );
    for record in radar_records(DiseaseId::Pneumonia.profile(), &pneumonia) {
        assert!((record.total() - 100.0).abs() <= 0.01, "{record:?}");
    }
}

#[test]
fn full_precision_is_kept_and_rounding_is_display_only() {
    let disease = DiseaseId::ChronicKidney.profile();
    let bars = bar_records(disease, &ckd_report());
    let xgb = &bars[1];

    assert!((xgb.positive - 66.6666).abs() < 1e-9);
    assert_eq!(format_percent(xgb.positive), "66.67");
    assert_eq!(format_percent(xgb.negative), "33.33");
}

#[test]
fn records_serialize_keyed_by_outcome_names() {
    let disease = DiseaseId::ChronicKidney.profile();
    let data = chart_data(disease, &ckd_report());
    let json = serde_json::to_value(&data).unwrap();

    let bar = &json["bar"][0];
    assert_eq!(bar["model"], "Logistic Regression");
    assert!(bar.get("CKD").is_some());
    assert!(bar.get("No CKD").is_some());

    let radar = &json["radar"][0];
    assert_eq!(radar["subject"], "Logistic Regression");
    assert!(radar.get("model").is_none());
}
