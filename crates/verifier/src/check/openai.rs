//! `OpenAI` chat completion probes

use async_trait::async_trait;
use credcheck_config::OpenAiConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{Check, CredentialSummary};
use crate::{
    credential::{mask, require, require_prefix},
    diagnostic::{Diagnostic, Failure},
    error::ProbeError,
    result::Success,
    service::Service,
};

const KEY_FIELD: &str = "OpenAI API key";
const KEY_PREFIX: &str = "sk-";

/// Fixed prompt and budget for one completion probe
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    system: &'static str,
    user: &'static str,
    max_tokens: u32,
    success: &'static str,
    reply_label: &'static str,
}

/// Short echo request proving the key works
pub const CREDENTIAL_SCENARIO: Scenario = Scenario {
    system: "You are a helpful assistant.",
    user: "Say 'OpenAI test successful' if you can read this.",
    max_tokens: 10,
    success: "OpenAI API test successful!",
    reply_label: "Response",
};

/// Sales-prospect role play exercising a longer reply
pub const COLD_CALL_SCENARIO: Scenario = Scenario {
    system: "You are a sales prospect in a cold call. Respond naturally to the caller.",
    user: "Hi Sarah, I know this is out of the blue, but I'm calling from TechCorp. Can I tell you why I'm calling?",
    max_tokens: 50,
    success: "Cold call test successful!",
    reply_label: "Prospect response",
};

const MISSING_KEY_HINTS: &[&str] = &[
    "Set REACT_APP_OPENAI_API_KEY or OPENAI_API_KEY in your environment or .env file",
    "Or set openai.api_key in the config file",
];

const MALFORMED_KEY_HINTS: &[&str] = &[
    "OpenAI API keys start with 'sk-'",
    "Copy the full key again from the OpenAI Console",
    "Check for extra spaces or quotes around the key in your .env file",
];

const INVALID_KEY_HINTS: &[&str] = &[
    "Your OpenAI API key is invalid",
    "Generate a new API key in the OpenAI Console",
    "Make sure you're using the correct API key",
];

const RATE_LIMIT_HINTS: &[&str] = &[
    "You've hit the OpenAI rate limit",
    "Wait a few minutes and try again",
    "Check your usage in the OpenAI Console",
];

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Chat completion probe against an OpenAI-compatible endpoint
pub struct OpenAiCheck {
    service: Service,
    scenario: Scenario,
    client: Client,
    api_key: Option<SecretString>,
    model: String,
    completions_url: String,
}

impl OpenAiCheck {
    /// Key check with a 10-token echo prompt
    pub fn credentials(config: &OpenAiConfig, client: Client) -> Self {
        Self::new(Service::Openai, CREDENTIAL_SCENARIO, config, client)
    }

    /// Cold-call role play, gated on [`OpenAiCheck::credentials`] passing
    pub fn cold_call(config: &OpenAiConfig, client: Client) -> Self {
        Self::new(Service::OpenaiColdCall, COLD_CALL_SCENARIO, config, client)
    }

    fn new(service: Service, scenario: Scenario, config: &OpenAiConfig, client: Client) -> Self {
        let base = config.base_url.as_str().trim_end_matches('/');

        Self {
            service,
            scenario,
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            completions_url: format!("{base}/chat/completions"),
        }
    }
}

#[async_trait]
impl Check for OpenAiCheck {
    fn service(&self) -> Service {
        self.service
    }

    fn validate_format(&self) -> Result<CredentialSummary, Failure> {
        let key = require(self.api_key.as_ref(), KEY_FIELD)?;
        require_prefix(key, KEY_FIELD, KEY_PREFIX)?;

        Ok(vec![("OpenAI API key found", mask(key))])
    }

    async fn probe(&self) -> Result<Success, ProbeError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ProbeError::MissingCredential(KEY_FIELD))?;

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: self.scenario.system,
                },
                ChatMessage {
                    role: "user",
                    content: self.scenario.user,
                },
            ],
            max_tokens: self.scenario.max_tokens,
        };

        tracing::debug!(
            service = %self.service,
            model = %self.model,
            max_tokens = self.scenario.max_tokens,
            "sending chat completion probe"
        );

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(service = %self.service, error = %e, "openai request failed"))?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);

            return Err(ProbeError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::UnexpectedResponse(format!("failed to parse completion: {e}")))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProbeError::UnexpectedResponse("completion contained no generated text".to_owned()))?;

        Ok(Success::new(self.scenario.success).with_detail(self.scenario.reply_label, reply.trim()))
    }

    fn classify(&self, error: &ProbeError) -> Diagnostic {
        classify(error)
    }

    fn remediation(&self, diagnostic: Diagnostic) -> &'static [&'static str] {
        match diagnostic {
            Diagnostic::MissingConfiguration => MISSING_KEY_HINTS,
            Diagnostic::MalformedCredential => MALFORMED_KEY_HINTS,
            Diagnostic::InvalidCredential => INVALID_KEY_HINTS,
            Diagnostic::RateLimited => RATE_LIMIT_HINTS,
            _ => &[],
        }
    }
}

/// Classify an `OpenAI` failure by status and message
pub fn classify(error: &ProbeError) -> Diagnostic {
    let ProbeError::Http { status, message } = error else {
        return Diagnostic::Unknown;
    };

    if *status == 401 || message.contains("Incorrect API key") {
        Diagnostic::InvalidCredential
    } else if *status == 429 || message.contains("Rate limit") {
        Diagnostic::RateLimited
    } else {
        Diagnostic::Unknown
    }
}
