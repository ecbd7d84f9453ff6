//! Forwards visitor form submissions.
//!
//! Each submission is validated first and is sent at most once: resubmitting
//! creates a duplicate at the destination, which is acceptable here.

use crate::app::ports::HttpClientPort;
use crate::error::{Result, SiteError};
use crate::forms::{BookingForm, CareerForm, FieldError};
use crate::metrics::{self, MetricName};
use crate::types::SubmitOutcome;
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

pub const BOOKING_PATH: &str = "/api/booking";
pub const CAREER_PATH: &str = "/api/career";

pub const SUBMIT_FAILED_MESSAGE: &str = "Произошла ошибка. Пожалуйста, попробуйте еще раз.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Booking,
    Application,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Booking => "booking",
            SubmissionKind::Application => "application",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            SubmissionKind::Booking => BOOKING_PATH,
            SubmissionKind::Application => CAREER_PATH,
        }
    }
}

pub struct SubmissionClient {
    http: Arc<dyn HttpClientPort>,
    /// Base URL of the receiving backend; submissions are only logged when unset
    forward_url: Option<String>,
}

impl SubmissionClient {
    pub fn new(http: Arc<dyn HttpClientPort>, forward_url: Option<String>) -> Self {
        Self {
            http,
            forward_url: forward_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    pub async fn submit_booking(&self, form: &BookingForm) -> SubmitOutcome {
        outcome(self.try_submit_booking(form, Local::now().date_naive()).await)
    }

    pub async fn submit_application(&self, form: &CareerForm) -> SubmitOutcome {
        outcome(self.try_submit_application(form).await)
    }

    /// Validates against `today` and forwards the booking. Returns the
    /// submission reference on success.
    pub async fn try_submit_booking(&self, form: &BookingForm, today: NaiveDate) -> Result<Uuid> {
        let errors = form.validate_on(today);
        if !errors.is_empty() {
            return Err(rejected(SubmissionKind::Booking, errors));
        }
        self.forward(SubmissionKind::Booking, &form.sanitized()).await
    }

    pub async fn try_submit_application(&self, form: &CareerForm) -> Result<Uuid> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(rejected(SubmissionKind::Application, errors));
        }
        self.forward(SubmissionKind::Application, &form.sanitized()).await
    }

    #[instrument(skip(self, kind, payload), fields(kind = kind.as_str()))]
    async fn forward<P: Serialize>(&self, kind: SubmissionKind, payload: &P) -> Result<Uuid> {
        let reference = Uuid::new_v4();
        let mut body = serde_json::to_value(payload)?;
        if let Value::Object(map) = &mut body {
            map.insert("reference".into(), Value::String(reference.to_string()));
            map.insert("submittedAt".into(), Value::String(Utc::now().to_rfc3339()));
        }

        let Some(base) = &self.forward_url else {
            info!(%reference, "No forward URL configured, submission recorded in log only");
            metrics::increment_labeled(MetricName::SubmissionsAccepted, "kind", kind.as_str());
            return Ok(reference);
        };

        let url = format!("{}{}", base, kind.path());
        match self.http.post_json(&url, &body).await {
            Ok(resp) if resp.is_success() => {
                info!(%reference, url = %url, "Submission forwarded");
                metrics::increment_labeled(MetricName::SubmissionsAccepted, "kind", kind.as_str());
                Ok(reference)
            }
            Ok(resp) => {
                error!(%reference, url = %url, status = resp.status, "Submission rejected by backend");
                metrics::increment_labeled(MetricName::SubmissionsFailed, "kind", kind.as_str());
                Err(SiteError::Submission(format!("backend answered {}", resp.status)))
            }
            Err(e) => {
                error!(%reference, url = %url, error = %e, "Submission could not be delivered");
                metrics::increment_labeled(MetricName::SubmissionsFailed, "kind", kind.as_str());
                Err(SiteError::Submission(e))
            }
        }
    }
}

fn rejected(kind: SubmissionKind, errors: Vec<FieldError>) -> SiteError {
    warn!(kind = kind.as_str(), fields = errors.len(), "Submission failed validation");
    metrics::increment_labeled(MetricName::SubmissionsRejected, "kind", kind.as_str());
    SiteError::Validation(errors)
}

/// Collapses a submission result into what the visitor sees.
pub fn outcome(result: Result<Uuid>) -> SubmitOutcome {
    match result {
        Ok(_) => SubmitOutcome::ok(),
        Err(SiteError::Validation(errors)) => SubmitOutcome::failed(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Err(_) => SubmitOutcome::failed(SUBMIT_FAILED_MESSAGE),
    }
}
