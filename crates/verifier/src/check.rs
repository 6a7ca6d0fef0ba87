pub mod aws;
pub mod elevenlabs;
pub mod openai;
pub mod polly;
pub mod sts;

use async_trait::async_trait;

use crate::{
    diagnostic::{Diagnostic, Failure},
    error::ProbeError,
    result::Success,
    service::Service,
};

/// Labelled, display-safe facts about a credential that passed validation
pub type CredentialSummary = Vec<(&'static str, String)>;

/// Uniform contract for verifying one external service
#[async_trait]
pub trait Check: Send + Sync {
    /// Service this check verifies
    fn service(&self) -> Service;

    /// Local presence and shape check; must not touch the network
    fn validate_format(&self) -> Result<CredentialSummary, Failure>;

    /// Issue exactly one live request to the provider
    async fn probe(&self) -> Result<Success, ProbeError>;

    /// Map a probe error to a diagnostic category
    fn classify(&self, error: &ProbeError) -> Diagnostic;

    /// Remediation steps printed for a diagnostic
    fn remediation(&self, _diagnostic: Diagnostic) -> &'static [&'static str] {
        &[]
    }
}
