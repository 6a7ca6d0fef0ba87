use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default `OpenAI` API base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model used for probes
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// `OpenAI` chat completion credentials
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// Bearer API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Chat model to probe with
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL override for compatible endpoints
    #[serde(default = "default_base_url")]
    pub base_url: Url,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_OPENAI_MODEL.to_owned()
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_OPENAI_BASE_URL).expect("valid default URL")
}
