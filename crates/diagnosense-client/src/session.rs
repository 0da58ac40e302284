//! One intake page's state: its form, the in-flight flag, and the last
//! outcome.
//!
//! A submission goes through [`DiagnosisSession::prepare`] (local checks,
//! sets `loading`) and [`DiagnosisSession::settle`] (clears `loading`,
//! replaces the outcome). [`DiagnosisSession::submit`] does both around a
//! transport call.

use diagnosense_core::disease::Disease;
use diagnosense_core::form::{CkdForm, DiagnosisForm, UploadForm};
use diagnosense_core::models::outcome::{ErrorState, Outcome};
use diagnosense_core::models::prediction::DiagnosisReport;
use diagnosense_core::models::upload::UploadFile;
use diagnosense_core::request::ApiRequest;
use tracing::info;

use crate::error::{ClientError, TransportError};
use crate::interpret::interpret;
use crate::transport::{HttpReply, Transport};

/// Label of the submit control while a request is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";

#[derive(Debug)]
pub struct DiagnosisSession<F> {
    form: F,
    loading: bool,
    outcome: Option<Outcome>,
}

impl<F: DiagnosisForm> DiagnosisSession<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            loading: false,
            outcome: None,
        }
    }

    pub fn disease(&self) -> &'static dyn Disease {
        self.form.disease()
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn report(&self) -> Option<&DiagnosisReport> {
        self.outcome.as_ref().and_then(Outcome::report)
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.outcome.as_ref().and_then(Outcome::error)
    }

    /// Current label of the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            PROCESSING_LABEL
        } else {
            self.disease().submit_label()
        }
    }

    /// Start a submission: build the request and mark the page as loading.
    ///
    /// A local rejection is recorded as the page's error and returned; no
    /// request should be sent in that case.
    pub fn prepare(&mut self) -> Result<ApiRequest, ClientError> {
        if self.loading {
            return Err(ClientError::Busy);
        }

        self.outcome = None;
        match self.form.build_request() {
            Ok(request) => {
                self.loading = true;
                info!(disease = %request.disease, endpoint = request.endpoint, "submitting");
                Ok(request)
            }
            Err(e) => {
                self.outcome = Some(Outcome::Error(ErrorState::new(e.to_string())));
                Err(e.into())
            }
        }
    }

    /// Finish a submission, replacing whatever was shown before.
    pub fn settle(&mut self, reply: Result<HttpReply, TransportError>) -> &Outcome {
        self.loading = false;
        let outcome = interpret(self.disease(), reply);
        if let Outcome::Report(report) = &outcome {
            info!(
                disease = %report.disease,
                report_id = %report.id,
                vote = %report.majority_vote_label,
                "diagnosis received"
            );
        }
        self.outcome.insert(outcome)
    }

    /// Submit the form through `transport` and return the settled outcome.
    ///
    /// Local rejections settle immediately without touching the transport.
    pub async fn submit<T: Transport>(&mut self, transport: &T) -> Result<&Outcome, ClientError> {
        let request = match self.prepare() {
            Ok(request) => request,
            Err(ClientError::Form(e)) => {
                let outcome: &Outcome = self
                    .outcome
                    .get_or_insert_with(|| Outcome::Error(ErrorState::new(e.to_string())));
                return Ok(outcome);
            }
            Err(e) => return Err(e),
        };

        let reply = transport.send(&request).await;
        Ok(self.settle(reply))
    }
}

impl DiagnosisSession<CkdForm> {
    /// Update one CKD field.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), ClientError> {
        self.form.set(field, value)?;
        Ok(())
    }
}

impl DiagnosisSession<UploadForm> {
    /// Choose a new file. Any displayed report or error is cleared.
    pub fn select_file(&mut self, file: Option<UploadFile>) {
        self.form.select_file(file);
        self.outcome = None;
    }
}
