//! Per-disease configuration.
//!
//! Every intake page runs the same pipeline (form → request → normalize →
//! chart → render). What differs between diseases is captured by the
//! [`Disease`] trait: the endpoint, the declared model order, the label
//! that counts as a positive finding, and how a single model entry in the
//! response is read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::diseases::{chronic_kidney::ChronicKidney, pneumonia::Pneumonia, prostate_cancer::ProstateCancer};
use crate::error::{CoreError, NormalizeError};
use crate::models::prediction::{DiagnosisReport, PredictionResult};
use crate::normalize;
use crate::response::ApiResponse;

/// Stable identifier for each supported disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiseaseId {
    ChronicKidney,
    Pneumonia,
    ProstateCancer,
}

impl DiseaseId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseId::ChronicKidney => "chronic_kidney",
            DiseaseId::Pneumonia => "pneumonia",
            DiseaseId::ProstateCancer => "prostate_cancer",
        }
    }

    /// The profile for this disease.
    pub fn profile(&self) -> &'static dyn Disease {
        match self {
            DiseaseId::ChronicKidney => &ChronicKidney,
            DiseaseId::Pneumonia => &Pneumonia,
            DiseaseId::ProstateCancer => &ProstateCancer,
        }
    }
}

impl fmt::Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiseaseId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chronic_kidney" | "chronic-kidney" | "ckd" => Ok(DiseaseId::ChronicKidney),
            "pneumonia" => Ok(DiseaseId::Pneumonia),
            "prostate_cancer" | "prostate-cancer" | "prostate" => Ok(DiseaseId::ProstateCancer),
            other => Err(CoreError::UnknownDisease(other.to_string())),
        }
    }
}

/// Display names of the two outcome classes, used as card labels and as
/// chart series keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeLabels {
    pub positive: &'static str,
    pub negative: &'static str,
}

/// How a file-upload page packages its single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSpec {
    /// Multipart field name the server reads the file from.
    pub field_name: &'static str,
    /// Browser-style accept filter, e.g. `image/*` or `.csv`.
    pub accept: &'static str,
    /// Shown when the user submits without choosing a file.
    pub missing_message: &'static str,
}

impl UploadSpec {
    /// Whether a file with the given name and content type passes the
    /// accept filter.
    pub fn accepts(&self, file_name: &str, content_type: &str) -> bool {
        self.accept.split(',').map(str::trim).any(|pattern| {
            if let Some(ext) = pattern.strip_prefix('.') {
                file_name.to_lowercase().ends_with(&format!(".{}", ext.to_lowercase()))
            } else if let Some(major) = pattern.strip_suffix("/*") {
                content_type.starts_with(&format!("{major}/"))
            } else {
                content_type == pattern
            }
        })
    }
}

/// Trait implemented by each diagnostic page profile.
pub trait Disease: Send + Sync {
    fn id(&self) -> DiseaseId;

    /// Page title, e.g. "Pneumonia Detection".
    fn title(&self) -> &'static str;

    /// One-line description for the predictor catalog.
    fn description(&self) -> &'static str;

    /// Route slug of the page, e.g. "/chronic-kidney".
    fn route(&self) -> &'static str;

    /// Endpoint path on the prediction service.
    fn endpoint(&self) -> &'static str;

    /// Models in the order cards and chart records are produced.
    fn model_order(&self) -> &'static [&'static str];

    /// The exact label that marks a positive finding.
    fn positive_label(&self) -> &'static str;

    fn outcomes(&self) -> OutcomeLabels;

    /// Idle label of the submit control.
    fn submit_label(&self) -> &'static str;

    /// `Some` for pages that submit a single file.
    fn upload(&self) -> Option<UploadSpec> {
        None
    }

    /// Message shown for a non-2xx response whose body carries no
    /// `error` string of its own.
    fn http_failure_message(&self, status: u16) -> String;

    /// Read one model's entry from the predictions map.
    fn read_entry(
        &self,
        model: &str,
        entry: &serde_json::Value,
    ) -> Result<PredictionResult, NormalizeError>;

    /// Turn a parsed response into a report.
    fn normalize(&self, response: &ApiResponse) -> Result<DiagnosisReport, NormalizeError> {
        normalize::normalize(self, response)
    }

    /// Visual class for a label: exact, case-sensitive match against
    /// [`Disease::positive_label`].
    fn badge_class(&self, label: &str) -> &'static str {
        if label == self.positive_label() {
            "result-positive"
        } else {
            "result-negative"
        }
    }
}

/// Return all registered diseases, in catalog order.
pub fn all_diseases() -> Vec<&'static dyn Disease> {
    vec![&Pneumonia, &ProstateCancer, &ChronicKidney]
}

/// Look up a disease by its identifier or route alias.
pub fn get_disease(id: &str) -> Option<&'static dyn Disease> {
    id.parse::<DiseaseId>().ok().map(|d| d.profile())
}
