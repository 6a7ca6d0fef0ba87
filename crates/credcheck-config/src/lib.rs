#![allow(clippy::must_use_candidate)]

pub mod aws;
pub mod elevenlabs;
mod env;
mod loader;
pub mod openai;
pub mod probe;

use serde::Deserialize;

pub use aws::*;
pub use elevenlabs::*;
pub use env::ExpandError;
pub use loader::{load_dotenv, load_dotenv_from};
pub use openai::*;
pub use probe::*;

/// Top-level credcheck configuration
///
/// Every service section is always present; a missing credential inside a
/// section is reported by that service's check rather than rejected here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Probe behavior shared by every check
    #[serde(default)]
    pub probe: ProbeConfig,
    /// `OpenAI` chat completion credentials
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// AWS credentials used by the STS and Polly checks
    #[serde(default)]
    pub aws: AwsConfig,
    /// `ElevenLabs` credentials
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
}
