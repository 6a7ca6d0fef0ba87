//! AWS Polly speech synthesis probe

use async_trait::async_trait;
use aws_sdk_polly::types::{OutputFormat, VoiceId};

use super::{
    Check, CredentialSummary,
    aws::{AwsSession, MALFORMED_KEY_HINTS, sdk_failure},
};
use crate::{
    artifact::ArtifactWriter,
    diagnostic::{Diagnostic, Failure},
    error::ProbeError,
    result::Success,
    service::Service,
};

const SAMPLE_TEXT: &str = "Hello! This is a test of the AWS Polly text to speech service.";
const ARTIFACT_PREFIX: &str = "aws_polly";

const NOT_ENABLED_HINTS: &[&str] = &[
    "Verify your AWS credentials are correct",
    "Make sure your AWS account has Polly service enabled",
    "Check if your IAM user has the necessary permissions",
    "Verify the AWS region is correct",
];

const SIGNATURE_HINTS: &[&str] = &[
    "Your AWS Secret Access Key is incorrect",
    "Check for any extra spaces or characters in your .env file",
];

const MISSING_HINTS: &[&str] = &[
    "Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY in your environment or .env file",
    "Set aws.polly_voice to a Polly voice such as Joanna",
];

const THROTTLING_HINTS: &[&str] = &[
    "Polly is throttling requests for this account",
    "Wait a minute and run the check again",
];

/// Synthesizes a fixed sentence and saves the MP3
pub struct PollyCheck {
    session: AwsSession,
    voice: String,
    artifacts: ArtifactWriter,
}

impl PollyCheck {
    pub const fn new(session: AwsSession, voice: String, artifacts: ArtifactWriter) -> Self {
        Self {
            session,
            voice,
            artifacts,
        }
    }
}

#[async_trait]
impl Check for PollyCheck {
    fn service(&self) -> Service {
        Service::AwsPolly
    }

    fn validate_format(&self) -> Result<CredentialSummary, Failure> {
        if self.voice.trim().is_empty() {
            return Err(Failure::missing("Polly voice"));
        }

        let mut summary = self.session.validate_format()?;
        summary.push(("Voice", self.voice.clone()));
        Ok(summary)
    }

    async fn probe(&self) -> Result<Success, ProbeError> {
        let sdk_config = self.session.sdk_config().await?;
        let client = aws_sdk_polly::Client::new(&sdk_config);

        tracing::debug!(region = %self.session.region(), voice = %self.voice, "sending SynthesizeSpeech probe");

        let output = client
            .synthesize_speech()
            .text(SAMPLE_TEXT)
            .output_format(OutputFormat::Mp3)
            .voice_id(VoiceId::from(self.voice.as_str()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "polly synthesize_speech failed");
                sdk_failure(&e)
            })?;

        let audio = output
            .audio_stream
            .collect()
            .await
            .map_err(|e| ProbeError::Transport(format!("failed to read audio stream: {e}")))?
            .into_bytes();

        if audio.is_empty() {
            return Err(ProbeError::UnexpectedResponse("empty audio payload".to_owned()));
        }

        let path = self.artifacts.write(ARTIFACT_PREFIX, "mp3", &audio).await?;

        Ok(Success::new(format!("Success! Audio saved as {}", path.display()))
            .with_detail("Bytes", audio.len().to_string())
            .with_artifact(path))
    }

    fn classify(&self, error: &ProbeError) -> Diagnostic {
        classify(error)
    }

    fn remediation(&self, diagnostic: Diagnostic) -> &'static [&'static str] {
        match diagnostic {
            Diagnostic::ServiceNotEnabled | Diagnostic::InvalidCredential => NOT_ENABLED_HINTS,
            Diagnostic::SignatureMismatch => SIGNATURE_HINTS,
            Diagnostic::RateLimited => THROTTLING_HINTS,
            Diagnostic::MissingConfiguration => MISSING_HINTS,
            Diagnostic::MalformedCredential => MALFORMED_KEY_HINTS,
            _ => &[],
        }
    }
}

/// Classify a Polly failure by its error code
///
/// An unrecognized client usually means the account or region has no Polly
/// access for these keys, even though STS accepted them.
pub fn classify(error: &ProbeError) -> Diagnostic {
    match error {
        ProbeError::Service { code, .. } => match code.as_str() {
            "UnrecognizedClientException" | "AccessDeniedException" => Diagnostic::ServiceNotEnabled,
            "InvalidSignatureException" => Diagnostic::SignatureMismatch,
            "ThrottlingException" => Diagnostic::RateLimited,
            _ => Diagnostic::Unknown,
        },
        ProbeError::Transport(text) if text.contains("UnrecognizedClientException") => {
            Diagnostic::ServiceNotEnabled
        }
        _ => Diagnostic::Unknown,
    }
}
