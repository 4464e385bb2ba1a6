//! Contact form model: the JSON payload posted to the form endpoint and the
//! submit/finish state machine that decides what the page shows afterwards.
//!
//! The endpoint is called in `no-cors` mode, so the response is opaque. The
//! only thing the page can learn is whether the request itself failed, which
//! gives exactly two outcomes: [`SubmitOutcome::Sent`] and
//! [`SubmitOutcome::Failed`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::ContactConfig;
use crate::error::{Result, SiteError};

/// The five user-entered fields, in the order they appear on the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

/// Body of the POST request. Keys match what the form endpoint expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "servicio")]
    pub service: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    pub timestamp: String,
}

/// `2026-10-16T08:30:00.123Z`, the same shape as `Date.prototype.toISOString`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ContactSubmission {
    pub fn new(fields: ContactFields, at: DateTime<Utc>) -> Self {
        ContactSubmission {
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            service: fields.service,
            message: fields.message,
            timestamp: iso_timestamp(at),
        }
    }

    pub fn now(fields: ContactFields) -> Self {
        ContactSubmission::new(fields, Utc::now())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(SiteError::Payload)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request went out; the opaque response is never inspected.
    Sent,
    /// The request could not be made (network error, bad endpoint).
    Failed,
}

impl SubmitOutcome {
    pub fn from_result<T, E>(result: &std::result::Result<T, E>) -> Self {
        match result {
            Ok(_) => SubmitOutcome::Sent,
            Err(_) => SubmitOutcome::Failed,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Ready,
    /// A request is in flight: button disabled, spinner showing.
    Submitting,
}

/// What the page should show once a submission settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    pub class_name: String,
    /// Reset the form fields. Only after a successful send, so a failed
    /// message can be resubmitted as is.
    pub clear_fields: bool,
    pub hide_after_ms: i32,
}

pub struct SubmissionController {
    phase: FormPhase,
    config: ContactConfig,
}

impl SubmissionController {
    pub fn new(config: ContactConfig) -> Self {
        SubmissionController {
            phase: FormPhase::Ready,
            config,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Enters `Submitting`. Returns false if a submission is already in
    /// flight, in which case the new one must be dropped.
    pub fn begin(&mut self) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        self.phase = FormPhase::Submitting;
        true
    }

    /// Leaves `Submitting` whatever the outcome.
    pub fn finish(&mut self, outcome: SubmitOutcome) -> StatusView {
        self.phase = FormPhase::Ready;
        let (text, class_name) = match outcome {
            SubmitOutcome::Sent => (&self.config.success_message, &self.config.success_class),
            SubmitOutcome::Failed => (&self.config.error_message, &self.config.error_class),
        };
        StatusView {
            text: text.clone(),
            class_name: class_name.clone(),
            clear_fields: outcome == SubmitOutcome::Sent,
            hide_after_ms: self.config.status_hide_after_ms,
        }
    }
}
