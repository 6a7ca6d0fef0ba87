use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default `ElevenLabs` API base URL
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Voice used when none is configured ("Bella")
pub const DEFAULT_ELEVENLABS_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";

/// Model used for the synthesis probe
pub const DEFAULT_ELEVENLABS_MODEL_ID: &str = "eleven_monolingual_v1";

/// `ElevenLabs` text-to-speech credentials
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElevenLabsConfig {
    /// API key sent in the `xi-api-key` header
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Voice to synthesize with
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Synthesis model
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Base URL override
    #[serde(default = "default_base_url")]
    pub base_url: Url,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: default_voice_id(),
            model_id: default_model_id(),
            base_url: default_base_url(),
        }
    }
}

fn default_voice_id() -> String {
    DEFAULT_ELEVENLABS_VOICE_ID.to_owned()
}

fn default_model_id() -> String {
    DEFAULT_ELEVENLABS_MODEL_ID.to_owned()
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_ELEVENLABS_BASE_URL).expect("valid default URL")
}
