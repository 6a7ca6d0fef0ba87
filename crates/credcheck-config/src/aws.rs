use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Region used when none is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Polly voice used for the synthesis probe
pub const DEFAULT_POLLY_VOICE: &str = "Joanna";

/// AWS credentials shared by the STS and Polly checks
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    /// Access key ID
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override (local stacks, tests)
    #[serde(default)]
    pub endpoint_url: Option<Url>,
    /// Voice for the Polly probe
    #[serde(default = "default_polly_voice")]
    pub polly_voice: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: default_region(),
            endpoint_url: None,
            polly_voice: default_polly_voice(),
        }
    }
}

fn default_region() -> String {
    DEFAULT_AWS_REGION.to_owned()
}

fn default_polly_voice() -> String {
    DEFAULT_POLLY_VOICE.to_owned()
}
