use serde::Deserialize;

use crate::disease::{Disease, DiseaseId, OutcomeLabels};
use crate::error::NormalizeError;
use crate::models::prediction::PredictionResult;
use crate::normalize::{check_probability, read_entry_as};

/// Chronic kidney disease from nine clinical markers. The only endpoint
/// that answers inside a status envelope.
pub struct ChronicKidney;

#[derive(Debug, Deserialize)]
struct CkdEntry {
    prediction: String,
    probability_ckd: f64,
}

impl Disease for ChronicKidney {
    fn id(&self) -> DiseaseId {
        DiseaseId::ChronicKidney
    }

    fn title(&self) -> &'static str {
        "Chronic Kidney Disease Prediction"
    }

    fn description(&self) -> &'static str {
        "Predict chronic kidney disease from clinical markers"
    }

    fn route(&self) -> &'static str {
        "/chronic-kidney"
    }

    fn endpoint(&self) -> &'static str {
        "/predict_ckd"
    }

    fn model_order(&self) -> &'static [&'static str] {
        &["Logistic Regression", "XGBoost", "Random Forest"]
    }

    fn positive_label(&self) -> &'static str {
        "There is a high risk of Chronic Kidney Disease"
    }

    fn outcomes(&self) -> OutcomeLabels {
        OutcomeLabels {
            positive: "CKD",
            negative: "No CKD",
        }
    }

    fn submit_label(&self) -> &'static str {
        "Analyze"
    }

    fn http_failure_message(&self, status: u16) -> String {
        format!("Request failed with status code {status}")
    }

    fn read_entry(
        &self,
        model: &str,
        entry: &serde_json::Value,
    ) -> Result<PredictionResult, NormalizeError> {
        let entry: CkdEntry = read_entry_as(model, entry)?;
        let positive = check_probability(model, "CKD", entry.probability_ckd)?;
        Ok(PredictionResult::derived(model, entry.prediction, positive))
    }
}
