use serde::Deserialize;

use crate::disease::{Disease, DiseaseId, OutcomeLabels, UploadSpec};
use crate::error::NormalizeError;
use crate::models::prediction::PredictionResult;
use crate::normalize::{check_probability, read_entry_as};

/// Prostate cancer from a gene-expression CSV.
pub struct ProstateCancer;

#[derive(Debug, Deserialize)]
struct ProstateEntry {
    #[serde(rename = "Prediction")]
    prediction: String,
    #[serde(rename = "Probabilities")]
    probabilities: ProstateProbabilities,
}

#[derive(Debug, Deserialize)]
struct ProstateProbabilities {
    #[serde(rename = "Cancer")]
    cancer: f64,
    #[serde(rename = "Non-Cancer")]
    non_cancer: f64,
}

impl Disease for ProstateCancer {
    fn id(&self) -> DiseaseId {
        DiseaseId::ProstateCancer
    }

    fn title(&self) -> &'static str {
        "Prostate Cancer Prediction"
    }

    fn description(&self) -> &'static str {
        "Analyze gene expression data to detect prostate cancer"
    }

    fn route(&self) -> &'static str {
        "/prostate-cancer"
    }

    fn endpoint(&self) -> &'static str {
        "/prostate-cancer"
    }

    fn model_order(&self) -> &'static [&'static str] {
        &["Logistic Regression", "XGBoost", "Random Forest"]
    }

    fn positive_label(&self) -> &'static str {
        "Cancer"
    }

    fn outcomes(&self) -> OutcomeLabels {
        OutcomeLabels {
            positive: "Cancer",
            negative: "Non-Cancer",
        }
    }

    fn submit_label(&self) -> &'static str {
        "Analyze Gene Expression Data"
    }

    fn upload(&self) -> Option<UploadSpec> {
        Some(UploadSpec {
            field_name: "file",
            accept: ".csv",
            missing_message: "Please upload a CSV file first.",
        })
    }

    fn http_failure_message(&self, _status: u16) -> String {
        "Something went wrong. Please check your file format.".to_string()
    }

    // Both probabilities are taken as supplied; the normalizer only warns
    // when they disagree.
    fn read_entry(
        &self,
        model: &str,
        entry: &serde_json::Value,
    ) -> Result<PredictionResult, NormalizeError> {
        let entry: ProstateEntry = read_entry_as(model, entry)?;
        Ok(PredictionResult {
            model: model.to_string(),
            label: entry.prediction,
            probability_positive: check_probability(model, "Cancer", entry.probabilities.cancer)?,
            probability_negative: check_probability(
                model,
                "Non-Cancer",
                entry.probabilities.non_cancer,
            )?,
        })
    }
}
