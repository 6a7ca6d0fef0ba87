use strum::{Display, EnumIter, EnumString};

/// A verifiable external service
///
/// The kebab-case form (`aws-sts`, `openai-cold-call`) is the stable id used
/// in logs and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Service {
    /// `OpenAI` key check with a short completion
    Openai,
    /// `OpenAI` cold-call scenario completion
    OpenaiColdCall,
    /// AWS STS `GetCallerIdentity`
    AwsSts,
    /// AWS Polly `SynthesizeSpeech`
    AwsPolly,
    /// `ElevenLabs` streaming synthesis
    Elevenlabs,
}

impl Service {
    /// Label used in the summary table
    pub const fn label(self) -> &'static str {
        match self {
            Self::Openai => "OpenAI Credentials",
            Self::OpenaiColdCall => "Cold Call Test",
            Self::AwsSts => "AWS Credentials",
            Self::AwsPolly => "AWS Polly",
            Self::Elevenlabs => "ElevenLabs",
        }
    }

    /// Progress line printed before the check starts
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Openai => "Testing OpenAI credentials...",
            Self::OpenaiColdCall => "Testing OpenAI cold call response...",
            Self::AwsSts => "Testing AWS credentials with STS...",
            Self::AwsPolly => "=== Testing AWS Polly ===",
            Self::Elevenlabs => "=== Testing ElevenLabs ===",
        }
    }

    /// Check that must succeed before this one may issue its live probe
    pub const fn prerequisite(self) -> Option<Self> {
        match self {
            Self::OpenaiColdCall => Some(Self::Openai),
            Self::AwsPolly => Some(Self::AwsSts),
            Self::Openai | Self::AwsSts | Self::Elevenlabs => None,
        }
    }
}
