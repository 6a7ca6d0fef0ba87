use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use verifier::Suite;

/// Credential checker
#[derive(Debug, Parser)]
#[command(
    name = "credcheck",
    about = "Verify LLM, AWS and text-to-speech credentials with one live probe each"
)]
pub struct Args {
    /// Checks to run: llm, tts or all
    #[arg(default_value_t = Suite::All)]
    pub suite: Suite,

    /// TOML configuration file; credentials come from the environment when absent
    #[arg(short, long, env = "CREDCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for synthesized audio files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Exit with status 1 when any check fails
    #[arg(long)]
    pub strict: bool,

    /// Log filter directive (overrides `CREDCHECK_LOG`)
    #[arg(long)]
    pub log: Option<String>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl From<LogFormat> for credcheck_telemetry::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Text => Self::Text,
            LogFormat::Json => Self::Json,
        }
    }
}
