//! `ElevenLabs` streaming text-to-speech probe

use async_trait::async_trait;
use credcheck_config::ElevenLabsConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::{Check, CredentialSummary};
use crate::{
    artifact::ArtifactWriter,
    credential::{mask, require},
    diagnostic::{Diagnostic, Failure},
    error::ProbeError,
    result::Success,
    service::Service,
};

const KEY_FIELD: &str = "ElevenLabs API key";
const SAMPLE_TEXT: &str = "Hello! This is a test of the ElevenLabs text to speech service.";
const ARTIFACT_PREFIX: &str = "elevenlabs";

const MISSING_HINTS: &[&str] = &[
    "Set REACT_APP_ELEVENLABS_API_KEY or ELEVENLABS_API_KEY in your environment or .env file",
    "Set a voice with ELEVENLABS_VOICE_ID or elevenlabs.voice_id",
];

const INVALID_KEY_HINTS: &[&str] = &[
    "Your ElevenLabs API key is invalid or was revoked",
    "Copy the key again from your ElevenLabs profile settings",
];

const QUOTA_HINTS: &[&str] = &[
    "Your ElevenLabs character quota or request rate is exhausted",
    "Wait for the quota to reset or upgrade the subscription",
];

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// Synthesizes a fixed sentence through the streaming endpoint and saves the MP3
pub struct ElevenLabsCheck {
    client: Client,
    api_key: Option<SecretString>,
    voice_id: String,
    model_id: String,
    base_url: String,
    artifacts: ArtifactWriter,
}

impl ElevenLabsCheck {
    pub fn new(config: &ElevenLabsConfig, client: Client, artifacts: ArtifactWriter) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            voice_id: config.voice_id.trim().to_owned(),
            model_id: config.model_id.clone(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            artifacts,
        }
    }

    fn stream_url(&self) -> String {
        format!("{}/text-to-speech/{}/stream", self.base_url, self.voice_id)
    }
}

#[async_trait]
impl Check for ElevenLabsCheck {
    fn service(&self) -> Service {
        Service::Elevenlabs
    }

    fn validate_format(&self) -> Result<CredentialSummary, Failure> {
        let key = require(self.api_key.as_ref(), KEY_FIELD)?;

        if self.voice_id.is_empty() {
            return Err(Failure::missing("ElevenLabs voice id"));
        }

        Ok(vec![
            ("ElevenLabs API key found", mask(key)),
            ("Voice", self.voice_id.clone()),
        ])
    }

    async fn probe(&self) -> Result<Success, ProbeError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ProbeError::MissingCredential(KEY_FIELD))?;

        let body = SynthesisRequest {
            text: SAMPLE_TEXT,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.75,
            },
        };

        tracing::debug!(voice = %self.voice_id, model = %self.model_id, "sending ElevenLabs synthesis probe");

        let response = self
            .client
            .post(self.stream_url())
            .header("xi-api-key", api_key.expose_secret())
            .header(http::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "elevenlabs request failed"))?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_owned());

            return Err(ProbeError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_owned();

        if !content_type.starts_with("audio/") {
            return Err(ProbeError::UnexpectedResponse(format!(
                "expected audio, got content type '{content_type}'"
            )));
        }

        let audio = response.bytes().await?;

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
            Diagnostic::MissingConfiguration => MISSING_HINTS,
            Diagnostic::InvalidCredential => INVALID_KEY_HINTS,
            Diagnostic::RateLimited => QUOTA_HINTS,
            _ => &[],
        }
    }
}

/// Classify an `ElevenLabs` failure by status and body
///
/// Exhausted quota is reported with a 401 whose body says `quota_exceeded`.
pub fn classify(error: &ProbeError) -> Diagnostic {
    let ProbeError::Http { status, message } = error else {
        return Diagnostic::Unknown;
    };

    if *status == 429 || message.contains("quota_exceeded") {
        Diagnostic::RateLimited
    } else if *status == 401 {
        Diagnostic::InvalidCredential
    } else {
        Diagnostic::Unknown
    }
}
