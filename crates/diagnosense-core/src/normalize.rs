use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::disease::Disease;
use crate::error::NormalizeError;
use crate::models::prediction::DiagnosisReport;
use crate::response::{majority_vote, per_model_entries, ApiResponse};

/// Map a parsed response onto a [`DiagnosisReport`].
///
/// Models are read in the disease's declared order. Keys the disease does
/// not declare are ignored, and a declared model that is absent is an
/// error rather than a partial report.
pub fn normalize<D: Disease + ?Sized>(
    disease: &D,
    response: &ApiResponse,
) -> Result<DiagnosisReport, NormalizeError> {
    let map = response.predictions()?;

    let extra: Vec<&str> = per_model_entries(map)
        .map(|(k, _)| k.as_str())
        .filter(|k| !disease.model_order().contains(k))
        .collect();
    if !extra.is_empty() {
        debug!(disease = %disease.id(), ?extra, "ignoring undeclared models");
    }

    let mut predictions = Vec::with_capacity(disease.model_order().len());
    for model in disease.model_order() {
        let entry = map
            .get(*model)
            .ok_or_else(|| NormalizeError::MissingModel((*model).to_string()))?;
        let result = disease.read_entry(model, entry)?;
        if !result.is_consistent() {
            warn!(
                disease = %disease.id(),
                model,
                positive = result.probability_positive,
                negative = result.probability_negative,
                "class probabilities do not sum to 1"
            );
        }
        predictions.push(result);
    }

    let vote = majority_vote(map).ok_or(NormalizeError::MissingVote)?;

    Ok(DiagnosisReport::new(disease.id(), predictions, vote))
}

/// Deserialize one model entry into its disease-specific wire shape.
pub fn read_entry_as<T: DeserializeOwned>(
    model: &str,
    entry: &serde_json::Value,
) -> Result<T, NormalizeError> {
    T::deserialize(entry).map_err(|e| NormalizeError::InvalidEntry {
        model: model.to_string(),
        reason: e.to_string(),
    })
}

/// Reject probabilities outside `[0, 1]`.
pub fn check_probability(model: &str, name: &str, value: f64) -> Result<f64, NormalizeError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(NormalizeError::InvalidEntry {
            model: model.to_string(),
            reason: format!("{name} probability {value} is outside [0, 1]"),
        })
    }
}

