use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::disease::DiseaseId;

/// Tolerance used when checking that the two class probabilities of a
/// model sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 0.01;

/// One model's output, reduced to a label and a positive/negative split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResult {
    pub model: String,
    pub label: String,
    /// Probability of the disease-positive outcome, in `[0, 1]`.
    pub probability_positive: f64,
    /// Probability of the negative outcome, in `[0, 1]`.
    pub probability_negative: f64,
}

impl PredictionResult {
    /// Build a result where the negative probability is derived from the
    /// positive one.
    pub fn derived(model: impl Into<String>, label: impl Into<String>, positive: f64) -> Self {
        Self {
            model: model.into(),
            label: label.into(),
            probability_positive: positive,
            probability_negative: 1.0 - positive,
        }
    }

    pub fn positive_percent(&self) -> f64 {
        self.probability_positive * 100.0
    }

    pub fn negative_percent(&self) -> f64 {
        self.probability_negative * 100.0
    }

    /// Whether both probabilities add up to one within
    /// [`PROBABILITY_TOLERANCE`].
    pub fn is_consistent(&self) -> bool {
        ((self.probability_positive + self.probability_negative) - 1.0).abs()
            <= PROBABILITY_TOLERANCE
    }
}

/// A normalized diagnosis: one result per declared model, in declared
/// order, plus the backend's consensus label.
///
/// Built fresh from every successful response and never merged with an
/// earlier report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosisReport {
    pub id: Uuid,
    pub disease: DiseaseId,
    pub predictions: Vec<PredictionResult>,
    pub majority_vote_label: String,
    pub received_at: jiff::Timestamp,
}

impl DiagnosisReport {
    pub fn new(
        disease: DiseaseId,
        predictions: Vec<PredictionResult>,
        majority_vote_label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            disease,
            predictions,
            majority_vote_label: majority_vote_label.into(),
            received_at: jiff::Timestamp::now(),
        }
    }

    pub fn prediction(&self, model: &str) -> Option<&PredictionResult> {
        self.predictions.iter().find(|p| p.model == model)
    }
}
