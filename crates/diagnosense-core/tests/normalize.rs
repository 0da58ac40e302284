use diagnosense_core::disease::{Disease, DiseaseId};
use diagnosense_core::diseases::chronic_kidney::ChronicKidney;
use diagnosense_core::diseases::pneumonia::Pneumonia;
use diagnosense_core::diseases::prostate_cancer::ProstateCancer;
use diagnosense_core::error::NormalizeError;
use diagnosense_core::response::{per_model_entries, ApiResponse, MAJORITY_VOTE_KEY};
use serde_json::json;

fn pneumonia_body() -> serde_json::Value {
    json!({
        "Random Forest": {"Prediction": "PNEUMONIA", "PNEUMONIA": 0.91, "NORMAL": 0.09},
        "KNN": {"Prediction": "NORMAL", "PNEUMONIA": 0.4, "NORMAL": 0.6},
        "XGBoost": {"Prediction": "PNEUMONIA", "PNEUMONIA": 0.8, "NORMAL": 0.2},
        "Majority Vote Result": "PNEUMONIA"
    })
}

fn ckd_envelope() -> serde_json::Value {
    json!({
        "status": "success",
        "predictions": {
            "Random Forest": {"prediction": "There is a high risk of Chronic Kidney Disease", "probability_ckd": 0.87},
            "Logistic Regression": {"prediction": "There is a low risk of Chronic Kidney Disease", "probability_ckd": 0.12},
            "XGBoost": {"prediction": "There is a high risk of Chronic Kidney Disease", "probability_ckd": 0.66},
            "Majority Vote Result": "There is a high risk of Chronic Kidney Disease"
        }
    })
}

#[test]
fn envelope_and_bare_shapes_are_discriminated() {
    let envelope = ApiResponse::from_value(ckd_envelope()).unwrap();
    assert!(matches!(envelope, ApiResponse::Envelope(_)));

    let bare = ApiResponse::from_value(pneumonia_body()).unwrap();
    assert!(matches!(bare, ApiResponse::Bare(_)));
}

#[test]
fn non_object_body_is_rejected() {
    assert_eq!(
        ApiResponse::from_value(json!(["a", "b"])).unwrap_err(),
        NormalizeError::NotAnObject
    );
    assert_eq!(
        ApiResponse::from_value(json!("oops")).unwrap_err(),
        NormalizeError::NotAnObject
    );
}

#[test]
fn per_model_iteration_excludes_majority_vote() {
    let response = ApiResponse::from_value(pneumonia_body()).unwrap();
    let map = response.predictions().unwrap();

    let models: Vec<&String> = per_model_entries(map).map(|(k, _)| k).collect();
    assert_eq!(models.len(), 3);
    assert!(models.iter().all(|k| k.as_str() != MAJORITY_VOTE_KEY));
}

#[test]
fn envelope_failure_carries_server_message() {
    let response = ApiResponse::from_value(json!({"status": "error", "message": "bad input"})).unwrap();
    let err = ChronicKidney.normalize(&response).unwrap_err();

    assert_eq!(
        err,
        NormalizeError::ServerReported {
            status: "error".to_string(),
            message: "bad input".to_string(),
        }
    );
    assert!(err.to_string().contains("bad input"));
}

#[test]
fn structured_envelope_message_is_kept_as_text() {
    let response =
        ApiResponse::from_value(json!({"status": "error", "message": {"detail": "bad input"}})).unwrap();
    assert!(matches!(response, ApiResponse::Envelope(_)));

    let err = ChronicKidney.normalize(&response).unwrap_err();
    assert_eq!(
        err,
        NormalizeError::ServerReported {
            status: "error".to_string(),
            message: r#"{"detail":"bad input"}"#.to_string(),
        }
    );
    assert!(err.to_string().starts_with("Server returned an error: "));
    assert!(err.to_string().contains("bad input"));
}

#[test]
fn numeric_status_is_still_an_envelope_failure() {
    let response = ApiResponse::from_value(json!({"status": 500, "message": "bad input"})).unwrap();
    assert!(matches!(response, ApiResponse::Envelope(_)));

    let err = Pneumonia.normalize(&response).unwrap_err();
    assert_eq!(
        err,
        NormalizeError::ServerReported {
            status: "500".to_string(),
            message: "bad input".to_string(),
        }
    );
}

#[test]
fn envelope_without_message_says_so() {
    let response = ApiResponse::from_value(json!({"status": "error", "message": null})).unwrap();
    let err = ProstateCancer.normalize(&response).unwrap_err();
    assert_eq!(err.to_string(), "Server returned an error: no message");
}

#[test]
fn success_envelope_without_predictions_object_is_rejected() {
    let response = ApiResponse::from_value(json!({"status": "success", "predictions": [1, 2]})).unwrap();
    assert_eq!(
        ChronicKidney.normalize(&response).unwrap_err(),
        NormalizeError::MissingPredictions
    );
}

#[test]
fn ckd_report_follows_declared_order_and_derives_negative() {
    let response = ApiResponse::from_value(ckd_envelope()).unwrap();
    let report = ChronicKidney.normalize(&response).unwrap();

    assert_eq!(report.disease, DiseaseId::ChronicKidney);
    let models: Vec<&str> = report.predictions.iter().map(|p| p.model.as_str()).collect();
    assert_eq!(models, ["Logistic Regression", "XGBoost", "Random Forest"]);

    let rf = report.prediction("Random Forest").unwrap();
    assert_eq!(rf.probability_positive, 0.87);
    assert!((rf.probability_negative - 0.13).abs() < 1e-12);
    assert_eq!(
        report.majority_vote_label,
        "There is a high risk of Chronic Kidney Disease"
    );
}

#[test]
fn bare_map_is_accepted_for_ckd_too() {
    let predictions = ckd_envelope()["predictions"].clone();
    let response = ApiResponse::from_value(predictions).unwrap();
    assert_eq!(ChronicKidney.normalize(&response).unwrap().predictions.len(), 3);
}

#[test]
fn pneumonia_report_reads_both_probabilities() {
    let response = ApiResponse::from_value(pneumonia_body()).unwrap();
    let report = Pneumonia.normalize(&response).unwrap();

    let models: Vec<&str> = report.predictions.iter().map(|p| p.model.as_str()).collect();
    assert_eq!(models, ["Random Forest", "KNN", "XGBoost"]);
    let knn = report.prediction("KNN").unwrap();
    assert_eq!(knn.label, "NORMAL");
    assert_eq!(knn.probability_positive, 0.4);
    assert_eq!(knn.probability_negative, 0.6);
}

#[test]
fn prostate_probabilities_are_trusted_even_when_inconsistent() {
    let body = json!({
        "Logistic Regression": {"Prediction": "Cancer", "Probabilities": {"Cancer": 0.7, "Non-Cancer": 0.5}},
        "XGBoost": {"Prediction": "Non-Cancer", "Probabilities": {"Cancer": 0.2, "Non-Cancer": 0.8}},
        "Random Forest": {"Prediction": "Cancer", "Probabilities": {"Cancer": 0.55, "Non-Cancer": 0.45}},
        "Majority Vote Result": "Cancer"
    });
    let report = ProstateCancer
        .normalize(&ApiResponse::from_value(body).unwrap())
        .unwrap();

    let lr = report.prediction("Logistic Regression").unwrap();
    assert_eq!(lr.probability_negative, 0.5);
    assert!(!lr.is_consistent());
    assert!(report.prediction("XGBoost").unwrap().is_consistent());
}

#[test]
fn missing_model_is_an_error_not_a_partial_report() {
    let mut body = pneumonia_body();
    body.as_object_mut().unwrap().remove("KNN");

    let err = Pneumonia
        .normalize(&ApiResponse::from_value(body).unwrap())
        .unwrap_err();
    assert_eq!(err, NormalizeError::MissingModel("KNN".to_string()));
}

#[test]
fn missing_vote_is_an_error() {
    let mut body = pneumonia_body();
    body.as_object_mut().unwrap().remove(MAJORITY_VOTE_KEY);

    let err = Pneumonia
        .normalize(&ApiResponse::from_value(body).unwrap())
        .unwrap_err();
    assert_eq!(err, NormalizeError::MissingVote);
}

#[test]
fn undeclared_models_are_ignored() {
    let mut body = pneumonia_body();
    body.as_object_mut()
        .unwrap()
        .insert("SVM".to_string(), json!({"Prediction": "NORMAL", "PNEUMONIA": 0.1, "NORMAL": 0.9}));

    let report = Pneumonia
        .normalize(&ApiResponse::from_value(body).unwrap())
        .unwrap();
    assert_eq!(report.predictions.len(), 3);
    assert!(report.prediction("SVM").is_none());
}

#[test]
fn wrong_entry_shape_names_the_model() {
    let mut body = pneumonia_body();
    body["XGBoost"] = json!({"prediction": "PNEUMONIA", "probability": 0.8});

    let err = Pneumonia
        .normalize(&ApiResponse::from_value(body).unwrap())
        .unwrap_err();
    assert!(matches!(err, NormalizeError::InvalidEntry { ref model, .. } if model == "XGBoost"));
}

#[test]
fn out_of_range_probability_is_rejected() {
    let mut body = ckd_envelope();
    body["predictions"]["XGBoost"]["probability_ckd"] = json!(1.7);

    let err = ChronicKidney
        .normalize(&ApiResponse::from_value(body).unwrap())
        .unwrap_err();
    assert!(matches!(err, NormalizeError::InvalidEntry { .. }));
}

#[test]
fn badge_class_is_an_exact_case_sensitive_match() {
    assert_eq!(Pneumonia.badge_class("PNEUMONIA"), "result-positive");
    assert_eq!(Pneumonia.badge_class("Pneumonia"), "result-negative");
    assert_eq!(ProstateCancer.badge_class("Cancer"), "result-positive");
    assert_eq!(ProstateCancer.badge_class("Non-Cancer"), "result-negative");
    assert_eq!(
        ChronicKidney.badge_class("There is a high risk of Chronic Kidney Disease"),
        "result-positive"
    );
    assert_eq!(
        ChronicKidney.badge_class("There is a low risk of Chronic Kidney Disease"),
        "result-negative"
    );
}
