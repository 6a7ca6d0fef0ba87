use std::path::PathBuf;

use crate::diagnostic::{Diagnostic, Failure};
use crate::service::Service;

/// Outcome of one verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub service: Service,
    pub success: bool,
    /// Human readable outcome line
    pub message: String,
    /// Failure category, `None` on success
    pub diagnostic: Option<Diagnostic>,
    /// Raw provider code or error text
    pub detail: Option<String>,
    /// Labelled values echoed from the provider (account, reply text, ...)
    pub details: Vec<(&'static str, String)>,
    /// Audio written by a TTS probe
    pub artifact: Option<PathBuf>,
    /// Remediation steps for the diagnostic
    pub hints: &'static [&'static str],
}

/// What a successful probe hands back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Success {
    pub message: String,
    pub details: Vec<(&'static str, String)>,
    pub artifact: Option<PathBuf>,
}

impl Success {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_detail(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.details.push((label, value.into()));
        self
    }

    #[must_use]
    pub fn with_artifact(mut self, path: PathBuf) -> Self {
        self.artifact = Some(path);
        self
    }
}

impl CheckResult {
    pub fn passed(service: Service, success: Success) -> Self {
        Self {
            service,
            success: true,
            message: success.message,
            diagnostic: None,
            detail: None,
            details: success.details,
            artifact: success.artifact,
            hints: &[],
        }
    }

    pub fn failed(service: Service, failure: Failure, hints: &'static [&'static str]) -> Self {
        Self {
            service,
            success: false,
            message: failure.message,
            diagnostic: Some(failure.diagnostic),
            detail: failure.detail,
            details: Vec::new(),
            artifact: None,
            hints,
        }
    }

    /// Result for a gated check whose prerequisite did not pass
    pub fn skipped(service: Service, prerequisite: Service) -> Self {
        let failure = Failure::new(
            Diagnostic::PrerequisiteFailed,
            format!("skipped: {} did not pass", prerequisite.label()),
        );
        Self::failed(service, failure, &[])
    }
}
