//! AWS STS caller identity probe

use async_trait::async_trait;

use super::{
    Check, CredentialSummary,
    aws::{AwsSession, MALFORMED_KEY_HINTS, MISSING_KEY_HINTS, sdk_failure},
};
use crate::{
    diagnostic::{Diagnostic, Failure},
    error::ProbeError,
    result::Success,
    service::Service,
};

const INVALID_TOKEN_HINTS: &[&str] = &[
    "Your AWS Access Key ID is invalid or has been deactivated",
    "Generate new credentials in the AWS Console",
    "Make sure you're using the correct AWS account",
];

const SIGNATURE_HINTS: &[&str] = &[
    "Your AWS Secret Access Key is incorrect",
    "Check for any extra spaces or characters in your .env file",
    "Generate new credentials in the AWS Console",
];

const THROTTLING_HINTS: &[&str] = &["STS is throttling this account", "Wait a minute and run the check again"];

/// Verifies the key pair with `GetCallerIdentity`
pub struct StsCheck {
    session: AwsSession,
}

impl StsCheck {
    pub const fn new(session: AwsSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Check for StsCheck {
    fn service(&self) -> Service {
        Service::AwsSts
    }

    fn validate_format(&self) -> Result<CredentialSummary, Failure> {
        self.session.validate_format()
    }

    async fn probe(&self) -> Result<Success, ProbeError> {
        let sdk_config = self.session.sdk_config().await?;
        let client = aws_sdk_sts::Client::new(&sdk_config);

        tracing::debug!(region = %self.session.region(), "sending GetCallerIdentity probe");

        let output = client.get_caller_identity().send().await.map_err(|e| {
            tracing::error!(error = %e, "sts get_caller_identity failed");
            sdk_failure(&e)
        })?;

        match (output.account(), output.arn()) {
            (Some(account), Some(arn)) => Ok(Success::new("AWS credentials are valid!")
                .with_detail("Account", account)
                .with_detail("User ARN", arn)),
            _ => Err(ProbeError::UnexpectedResponse(
                "caller identity is missing the account or ARN".to_owned(),
            )),
        }
    }

    fn classify(&self, error: &ProbeError) -> Diagnostic {
        classify(error)
    }

    fn remediation(&self, diagnostic: Diagnostic) -> &'static [&'static str] {
        match diagnostic {
            Diagnostic::MissingConfiguration => MISSING_KEY_HINTS,
            Diagnostic::MalformedCredential => MALFORMED_KEY_HINTS,
            Diagnostic::InvalidCredential => INVALID_TOKEN_HINTS,
            Diagnostic::SignatureMismatch => SIGNATURE_HINTS,
            Diagnostic::RateLimited => THROTTLING_HINTS,
            _ => &[],
        }
    }
}

/// Classify an STS failure by its error code
pub fn classify(error: &ProbeError) -> Diagnostic {
    match error.code() {
        Some("InvalidClientTokenId" | "ExpiredToken") => Diagnostic::InvalidCredential,
        Some("SignatureDoesNotMatch") => Diagnostic::SignatureMismatch,
        Some("Throttling") => Diagnostic::RateLimited,
        _ => Diagnostic::Unknown,
    }
}
