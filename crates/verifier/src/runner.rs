use std::io::{self, Write};

use credcheck_config::Config;
use strum::{Display, EnumString};

use crate::{
    artifact::ArtifactWriter,
    check::{
        Check, aws::AwsSession, elevenlabs::ElevenLabsCheck, openai::OpenAiCheck, polly::PollyCheck, sts::StsCheck,
    },
    diagnostic::Failure,
    error::ProbeError,
    http_client::http_client,
    report::Report,
    result::CheckResult,
    service::Service,
};

/// Group of checks run together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Suite {
    /// `OpenAI` key and cold-call scenario
    Llm,
    /// `ElevenLabs`, STS and Polly
    Tts,
    /// Everything
    #[default]
    All,
}

impl Suite {
    pub const fn services(self) -> &'static [Service] {
        match self {
            Self::Llm => &[Service::Openai, Service::OpenaiColdCall],
            Self::Tts => &[Service::Elevenlabs, Service::AwsSts, Service::AwsPolly],
            Self::All => &[
                Service::Openai,
                Service::OpenaiColdCall,
                Service::Elevenlabs,
                Service::AwsSts,
                Service::AwsPolly,
            ],
        }
    }
}

/// Runs checks one after another and collects one result per check
pub struct Runner {
    checks: Vec<Box<dyn Check>>,
}

impl Runner {
    /// Wrap checks, moving gated checks behind their prerequisites
    ///
    /// Ungated checks keep their relative order, followed by gated checks in
    /// theirs. Prerequisites are never gated themselves, so this is enough for
    /// every gate to see its prerequisite's result.
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        let (mut ordered, gated): (Vec<_>, Vec<_>) = checks
            .into_iter()
            .partition(|check| check.service().prerequisite().is_none());
        ordered.extend(gated);

        Self { checks: ordered }
    }

    /// Build the checks of a suite from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn from_config(config: &Config, suite: Suite) -> Result<Self, ProbeError> {
        let client = http_client(config.probe.timeout)?;
        let artifacts = ArtifactWriter::new(&config.probe.output_dir);
        let session = AwsSession::new(&config.aws, config.probe.timeout);

        let checks = suite
            .services()
            .iter()
            .map(|service| -> Box<dyn Check> {
                match service {
                    Service::Openai => Box::new(OpenAiCheck::credentials(&config.openai, client.clone())),
                    Service::OpenaiColdCall => Box::new(OpenAiCheck::cold_call(&config.openai, client.clone())),
                    Service::AwsSts => Box::new(StsCheck::new(session.clone())),
                    Service::AwsPolly => Box::new(PollyCheck::new(
                        session.clone(),
                        config.aws.polly_voice.clone(),
                        artifacts.clone(),
                    )),
                    Service::Elevenlabs => Box::new(ElevenLabsCheck::new(
                        &config.elevenlabs,
                        client.clone(),
                        artifacts.clone(),
                    )),
                }
            })
            .collect();

        Ok(Self::new(checks))
    }

    /// Services in the order they will run
    pub fn services(&self) -> Vec<Service> {
        self.checks.iter().map(|check| check.service()).collect()
    }

    /// Run every check, printing progress and the summary
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the report fails
    pub async fn run<W: Write>(&self, report: &mut Report<W>) -> io::Result<Vec<CheckResult>> {
        let mut results: Vec<CheckResult> = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let result = run_check(check.as_ref(), &results, report).await?;
            results.push(result);
        }

        report.summary(&results)?;

        Ok(results)
    }
}

/// Validate, gate, probe and classify a single check
///
/// `prior` holds the results produced earlier in the run; a gated check
/// whose prerequisite failed there is skipped without any network call.
pub async fn run_check<W: Write>(
    check: &dyn Check,
    prior: &[CheckResult],
    report: &mut Report<W>,
) -> io::Result<CheckResult> {
    let service = check.service();
    report.banner(service)?;

    if let Some(prerequisite) = service.prerequisite()
        && prior
            .iter()
            .any(|result| result.service == prerequisite && !result.success)
    {
        tracing::info!(%service, %prerequisite, "skipping probe, prerequisite failed");
        let result = CheckResult::skipped(service, prerequisite);
        report.outcome(&result)?;
        return Ok(result);
    }

    let result = match check.validate_format() {
        Err(failure) => {
            tracing::warn!(%service, diagnostic = %failure.diagnostic, "credential failed validation");
            let hints = check.remediation(failure.diagnostic);
            CheckResult::failed(service, failure, hints)
        }
        Ok(summary) => {
            report.validated(&summary)?;

            match check.probe().await {
                Ok(success) => CheckResult::passed(service, success),
                Err(error) => {
                    let diagnostic = check.classify(&error);
                    tracing::warn!(%service, %diagnostic, error = %error, "probe failed");

                    let failure = Failure::new(diagnostic, format!("{} check failed ({diagnostic})", service.label()))
                        .with_detail(error.to_string());
                    CheckResult::failed(service, failure, check.remediation(diagnostic))
                }
            }
        }
    };

    report.outcome(&result)?;

    Ok(result)
}

/// Whether every result passed
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|result| result.success)
}
