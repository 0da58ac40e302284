//! Request building: form state in, a transport-agnostic request out.

use serde::Serialize;
use tracing::{debug, warn};

use crate::disease::{Disease, DiseaseId};
use crate::form::CkdForm;
use crate::models::upload::UploadFile;

/// Base URL of the hosted prediction service.
pub const DEFAULT_API_BASE_URL: &str = "https://diagnosensebackend.onrender.com";

/// A request ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub disease: DiseaseId,
    pub endpoint: &'static str,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    /// A multipart body with a single file part.
    Multipart {
        field_name: &'static str,
        file: UploadFile,
    },
}

impl ApiRequest {
    pub fn new(disease: &dyn Disease, body: RequestBody) -> Self {
        Self {
            disease: disease.id(),
            endpoint: disease.endpoint(),
            body,
        }
    }

    /// Join the endpoint path onto a base URL.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint)
    }
}

/// JSON body of the CKD endpoint.
///
/// `al` is `None` when the text holds no integer, and the float fields are
/// NaN when they hold no number; both serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CkdPayload {
    pub sg: f64,
    pub al: Option<i64>,
    pub sc: f64,
    pub bu: f64,
    pub hemo: f64,
    pub bgr: f64,
    pub htn: String,
    pub dm: String,
    pub pc: String,
}

impl CkdPayload {
    pub fn from_form(form: &CkdForm) -> Self {
        let payload = Self {
            sg: parse_float_prefix(&form.sg),
            al: parse_int_prefix(&form.al),
            sc: parse_float_prefix(&form.sc),
            bu: parse_float_prefix(&form.bu),
            hemo: parse_float_prefix(&form.hemo),
            bgr: parse_float_prefix(&form.bgr),
            htn: form.htn.clone(),
            dm: form.dm.clone(),
            pc: form.pc.clone(),
        };

        for (field, value) in [
            ("sg", payload.sg),
            ("sc", payload.sc),
            ("bu", payload.bu),
            ("hemo", payload.hemo),
            ("bgr", payload.bgr),
        ] {
            if value.is_nan() {
                warn!(field, "field is not a number, sending null");
            }
        }
        if payload.al.is_none() {
            warn!(field = "al", "field is not an integer, sending null");
        }

        debug!(?payload, "built CKD payload");
        payload
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "sg": self.sg,
            "al": self.al,
            "sc": self.sc,
            "bu": self.bu,
            "hemo": self.hemo,
            "bgr": self.bgr,
            "htn": self.htn,
            "dm": self.dm,
            "pc": self.pc,
        })
    }
}

/// Parse the longest leading decimal number in `text`, skipping leading
/// whitespace. Returns NaN when there is none.
///
/// Trailing garbage is ignored, so `"1.020abc"` parses as `1.02`.
pub fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the leading base-10 integer in `text`, skipping leading
/// whitespace. A fractional part is truncated (`"2.7"` is `2`), and a
/// value beyond the `i64` range saturates at `i64::MAX` or `i64::MIN`.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    // Sign plus at least one digit, so the only possible failure is overflow.
    match s[..end].parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if bytes[0] == b'-' => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
