use serde::Deserialize;

use crate::disease::{Disease, DiseaseId, OutcomeLabels, UploadSpec};
use crate::error::NormalizeError;
use crate::models::prediction::PredictionResult;
use crate::normalize::{check_probability, read_entry_as};

/// Pneumonia from a chest X-ray image.
pub struct Pneumonia;

#[derive(Debug, Deserialize)]
struct PneumoniaEntry {
    #[serde(rename = "Prediction")]
    prediction: String,
    #[serde(rename = "PNEUMONIA")]
    pneumonia: f64,
    #[serde(rename = "NORMAL")]
    normal: f64,
}

impl Disease for Pneumonia {
    fn id(&self) -> DiseaseId {
        DiseaseId::Pneumonia
    }

    fn title(&self) -> &'static str {
        "Pneumonia Detection"
    }

    fn description(&self) -> &'static str {
        "Upload chest X-rays for AI-powered pneumonia diagnosis"
    }

    fn route(&self) -> &'static str {
        "/pneumonia"
    }

    fn endpoint(&self) -> &'static str {
        "/predict_pneumonia"
    }

    fn model_order(&self) -> &'static [&'static str] {
        &["Random Forest", "KNN", "XGBoost"]
    }

    fn positive_label(&self) -> &'static str {
        "PNEUMONIA"
    }

    fn outcomes(&self) -> OutcomeLabels {
        OutcomeLabels {
            positive: "PNEUMONIA",
            negative: "NORMAL",
        }
    }

    fn submit_label(&self) -> &'static str {
        "Analyze X-ray"
    }

    fn upload(&self) -> Option<UploadSpec> {
        Some(UploadSpec {
            field_name: "image",
            accept: "image/*",
            missing_message: "Please upload an image.",
        })
    }

    fn http_failure_message(&self, _status: u16) -> String {
        "Error processing the image. Please try again.".to_string()
    }

    fn read_entry(
        &self,
        model: &str,
        entry: &serde_json::Value,
    ) -> Result<PredictionResult, NormalizeError> {
        let entry: PneumoniaEntry = read_entry_as(model, entry)?;
        Ok(PredictionResult {
            model: model.to_string(),
            label: entry.prediction,
            probability_positive: check_probability(model, "PNEUMONIA", entry.pneumonia)?,
            probability_negative: check_probability(model, "NORMAL", entry.normal)?,
        })
    }
}
