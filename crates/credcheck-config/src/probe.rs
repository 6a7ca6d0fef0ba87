use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by every probe
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Upper bound for a single live request (e.g. "10s", "1m")
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Directory where synthesized audio is written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            output_dir: default_output_dir(),
        }
    }
}

const fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
