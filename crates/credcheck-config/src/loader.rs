use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::env::first_var;
use crate::{AwsConfig, Config, ElevenLabsConfig, OpenAiConfig, ProbeConfig};

const OPENAI_API_KEY_VARS: &[&str] = &["REACT_APP_OPENAI_API_KEY", "OPENAI_API_KEY"];
const AWS_ACCESS_KEY_VARS: &[&str] = &["AWS_ACCESS_KEY_ID"];
const AWS_SECRET_KEY_VARS: &[&str] = &["AWS_SECRET_ACCESS_KEY"];
const AWS_REGION_VARS: &[&str] = &["AWS_REGION"];
const ELEVENLABS_API_KEY_VARS: &[&str] = &["REACT_APP_ELEVENLABS_API_KEY", "ELEVENLABS_API_KEY"];
const ELEVENLABS_VOICE_VARS: &[&str] = &["REACT_APP_ELEVENLABS_VOICE_ID", "ELEVENLABS_VOICE_ID"];
const TIMEOUT_VARS: &[&str] = &["CREDCHECK_TIMEOUT"];

const DOTENV_FILE: &str = ".env";

/// Load a `.env` file from the working directory or its parents
///
/// Variables already present in the process environment are not overridden.
/// Returns the path of the file that was read, if any. This runs before
/// logging is set up, so the caller reports the outcome.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable or a `.env`
/// file exists but cannot be read or parsed
pub fn load_dotenv() -> anyhow::Result<Option<PathBuf>> {
    let cwd = std::env::current_dir().map_err(|e| anyhow::anyhow!("failed to resolve working directory: {e}"))?;
    load_dotenv_from(&cwd)
}

/// Load the nearest `.env` file found in `dir` or its ancestors
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed
pub fn load_dotenv_from(dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = dir.ancestors().map(|d| d.join(DOTENV_FILE)).find(|p| p.is_file()) else {
        return Ok(None);
    };

    dotenvy::from_path(&path).map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?;

    Ok(Some(path))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from process environment variables
    ///
    /// Credentials that are unset stay `None` so their checks can report
    /// them as missing. Region and voice fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `CREDCHECK_TIMEOUT` is set but not a valid duration
    pub fn from_env() -> anyhow::Result<Self> {
        let mut probe = ProbeConfig::default();
        if let Some(raw) = first_var(TIMEOUT_VARS) {
            probe.timeout =
                duration_str::parse(&raw).map_err(|e| anyhow::anyhow!("invalid CREDCHECK_TIMEOUT '{raw}': {e}"))?;
        }

        let secret = |names: &[&str]| first_var(names).map(SecretString::from);

        let mut aws = AwsConfig {
            access_key_id: secret(AWS_ACCESS_KEY_VARS),
            secret_access_key: secret(AWS_SECRET_KEY_VARS),
            ..AwsConfig::default()
        };
        if let Some(region) = first_var(AWS_REGION_VARS) {
            aws.region = region;
        }

        let mut elevenlabs = ElevenLabsConfig {
            api_key: secret(ELEVENLABS_API_KEY_VARS),
            ..ElevenLabsConfig::default()
        };
        if let Some(voice_id) = first_var(ELEVENLABS_VOICE_VARS) {
            elevenlabs.voice_id = voice_id;
        }

        let config = Self {
            probe,
            openai: OpenAiConfig {
                api_key: secret(OPENAI_API_KEY_VARS),
                ..OpenAiConfig::default()
            },
            aws,
            elevenlabs,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero, the region is blank, or a
    /// base URL does not use http(s)
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.probe.timeout.is_zero() {
            anyhow::bail!("probe.timeout must be greater than 0");
        }

        if self.aws.region.trim().is_empty() {
            anyhow::bail!("aws.region must not be empty");
        }

        let urls = [
            ("openai.base_url", Some(&self.openai.base_url)),
            ("elevenlabs.base_url", Some(&self.elevenlabs.base_url)),
            ("aws.endpoint_url", self.aws.endpoint_url.as_ref()),
        ];

        for (field, url) in urls {
            if let Some(url) = url
                && !matches!(url.scheme(), "http" | "https")
            {
                anyhow::bail!("{field} must use http or https, got '{}'", url.scheme());
            }
        }

        Ok(())
    }
}
