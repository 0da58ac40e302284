//! Per-page form state.
//!
//! Forms hold exactly what the user entered. Numeric fields stay as raw
//! text until the request is built; choice fields only accept their listed
//! options, the way a `<select>` would.

use crate::disease::{Disease, DiseaseId};
use crate::error::FormError;
use crate::models::upload::UploadFile;
use crate::request::{ApiRequest, CkdPayload, RequestBody};

/// Implemented by every page's form: knows its disease and how to turn
/// itself into a request.
pub trait DiagnosisForm {
    fn disease(&self) -> &'static dyn Disease;

    /// Build the request, or reject locally before any network call.
    fn build_request(&self) -> Result<ApiRequest, FormError>;
}

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free numeric text with an input step.
    Number { step: &'static str },
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
}

/// Display metadata for one field of the CKD form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
    pub hint: &'static str,
}

impl FieldKind {
    /// Short input description, e.g. `step 0.001` or `yes|no`.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Number { step } => format!("step {step}"),
            FieldKind::Choice(options) => options.join("|"),
        }
    }
}

impl FieldSpec {
    /// One-line help text: label, input kind and range hint.
    pub fn help(&self) -> String {
        format!("{} ({}). {}", self.label, self.kind.describe(), self.hint)
    }
}

pub const YES_NO: &[&str] = &["yes", "no"];
pub const NORMAL_ABNORMAL: &[&str] = &["normal", "abnormal"];
pub const ALBUMIN_LEVELS: &[&str] = &["0", "1", "2", "3", "4", "5"];

/// The CKD intake fields, in form order.
pub const CKD_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "sg",
        label: "Specific Gravity",
        kind: FieldKind::Number { step: "0.001" },
        default: "1.020",
        hint: "Range: 1.005–1.030",
    },
    FieldSpec {
        name: "al",
        label: "Albumin Level",
        kind: FieldKind::Choice(ALBUMIN_LEVELS),
        default: "0",
        hint: "Range: 0–5 (0 = normal, 5 = high)",
    },
    FieldSpec {
        name: "sc",
        label: "Serum Creatinine",
        kind: FieldKind::Number { step: "0.1" },
        default: "1.2",
        hint: "Range: 0.6–1.2 mg/dL",
    },
    FieldSpec {
        name: "bu",
        label: "Blood Urea",
        kind: FieldKind::Number { step: "0.1" },
        default: "15.0",
        hint: "Range: 7–20 mg/dL",
    },
    FieldSpec {
        name: "hemo",
        label: "Hemoglobin",
        kind: FieldKind::Number { step: "0.1" },
        default: "14.5",
        hint: "Range: 12–18 g/dL",
    },
    FieldSpec {
        name: "bgr",
        label: "Blood Glucose Random",
        kind: FieldKind::Number { step: "1" },
        default: "100",
        hint: "Range: 70–140 mg/dL fasting",
    },
    FieldSpec {
        name: "htn",
        label: "Hypertension",
        kind: FieldKind::Choice(YES_NO),
        default: "no",
        hint: "Presence of hypertension",
    },
    FieldSpec {
        name: "dm",
        label: "Diabetes Mellitus",
        kind: FieldKind::Choice(YES_NO),
        default: "no",
        hint: "Presence of diabetes",
    },
    FieldSpec {
        name: "pc",
        label: "Pus Cell",
        kind: FieldKind::Choice(NORMAL_ABNORMAL),
        default: "normal",
        hint: "Presence of pus cells in urine",
    },
];

pub fn ckd_field(name: &str) -> Option<&'static FieldSpec> {
    CKD_FIELDS.iter().find(|f| f.name == name)
}

/// Clinical marker form for the CKD page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CkdForm {
    pub sg: String,
    pub al: String,
    pub sc: String,
    pub bu: String,
    pub hemo: String,
    pub bgr: String,
    pub htn: String,
    pub dm: String,
    pub pc: String,
}

impl Default for CkdForm {
    fn default() -> Self {
        Self {
            sg: "1.020".to_string(),
            al: "0".to_string(),
            sc: "1.2".to_string(),
            bu: "15.0".to_string(),
            hemo: "14.5".to_string(),
            bgr: "100".to_string(),
            htn: "no".to_string(),
            dm: "no".to_string(),
            pc: "normal".to_string(),
        }
    }
}

impl CkdForm {
    /// Replace one field's value, leaving the rest untouched.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        let spec = ckd_field(field).ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        let value = value.into();

        if let FieldKind::Choice(allowed) = spec.kind
            && !allowed.contains(&value.as_str())
        {
            return Err(FormError::InvalidOption {
                field: field.to_string(),
                value,
                allowed,
            });
        }

        let slot = match spec.name {
            "sg" => &mut self.sg,
            "al" => &mut self.al,
            "sc" => &mut self.sc,
            "bu" => &mut self.bu,
            "hemo" => &mut self.hemo,
            "bgr" => &mut self.bgr,
            "htn" => &mut self.htn,
            "dm" => &mut self.dm,
            "pc" => &mut self.pc,
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        *slot = value;
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "sg" => &self.sg,
            "al" => &self.al,
            "sc" => &self.sc,
            "bu" => &self.bu,
            "hemo" => &self.hemo,
            "bgr" => &self.bgr,
            "htn" => &self.htn,
            "dm" => &self.dm,
            "pc" => &self.pc,
            _ => return None,
        };
        Some(value.as_str())
    }
}

impl DiagnosisForm for CkdForm {
    fn disease(&self) -> &'static dyn Disease {
        DiseaseId::ChronicKidney.profile()
    }

    fn build_request(&self) -> Result<ApiRequest, FormError> {
        let payload = CkdPayload::from_form(self);
        Ok(ApiRequest::new(
            self.disease(),
            RequestBody::Json(payload.to_value()),
        ))
    }
}

/// Single-file form used by the upload pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    disease: DiseaseId,
    file: Option<UploadFile>,
}

impl UploadForm {
    /// An empty form for a disease that takes a file upload. Returns `None`
    /// for typed-field diseases.
    pub fn for_disease(disease: DiseaseId) -> Option<Self> {
        disease.profile().upload().map(|_| Self {
            disease,
            file: None,
        })
    }

    pub fn pneumonia() -> Self {
        Self {
            disease: DiseaseId::Pneumonia,
            file: None,
        }
    }

    pub fn prostate_cancer() -> Self {
        Self {
            disease: DiseaseId::ProstateCancer,
            file: None,
        }
    }

    /// Replace the selected file. `None` models a cancelled picker.
    pub fn select_file(&mut self, file: Option<UploadFile>) {
        self.file = file;
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.file_name.as_str())
    }
}

impl DiagnosisForm for UploadForm {
    fn disease(&self) -> &'static dyn Disease {
        self.disease.profile()
    }

    fn build_request(&self) -> Result<ApiRequest, FormError> {
        let disease = self.disease();
        let spec = disease
            .upload()
            .ok_or_else(|| FormError::UnknownField("file".to_string()))?;
        let file = self
            .file
            .clone()
            .ok_or(FormError::MissingFile(spec.missing_message))?;

        if !spec.accepts(&file.file_name, &file.content_type) {
            tracing::warn!(
                disease = %disease.id(),
                file_name = %file.file_name,
                accept = spec.accept,
                "selected file does not match the accept filter"
            );
        }

        Ok(ApiRequest::new(
            disease,
            RequestBody::Multipart {
                field_name: spec.field_name,
                file,
            },
        ))
    }
}
