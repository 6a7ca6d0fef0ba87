use strum::{AsRefStr, Display};

/// Closed set of reasons a check can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Diagnostic {
    /// A required credential field is absent
    MissingConfiguration,
    /// A credential is present but has the wrong shape
    MalformedCredential,
    /// The provider rejected the credential
    InvalidCredential,
    /// The secret does not match the key it was paired with
    SignatureMismatch,
    /// The provider throttled the request
    RateLimited,
    /// The credential is valid but the service is not enabled for it
    ServiceNotEnabled,
    /// A gating check failed, so no probe was sent
    PrerequisiteFailed,
    /// Anything the provider classifier does not recognize
    Unknown,
}

impl Diagnostic {
    /// Detected locally, before any network call
    pub const fn is_local(self) -> bool {
        matches!(self, Self::MissingConfiguration | Self::MalformedCredential)
    }

    /// The provider saw the credential and refused it
    pub const fn is_authentication(self) -> bool {
        matches!(
            self,
            Self::InvalidCredential | Self::SignatureMismatch | Self::ServiceNotEnabled
        )
    }
}

/// A classified failure, before it is attached to a service result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub diagnostic: Diagnostic,
    /// Operator-facing summary
    pub message: String,
    /// Raw provider code or error text
    pub detail: Option<String>,
}

impl Failure {
    pub fn new(diagnostic: Diagnostic, message: impl Into<String>) -> Self {
        Self {
            diagnostic,
            message: message.into(),
            detail: None,
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(Diagnostic::MissingConfiguration, format!("{field} is missing"))
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(Diagnostic::MalformedCredential, message)
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
