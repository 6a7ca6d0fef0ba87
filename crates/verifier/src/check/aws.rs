//! Credential handling shared by the STS and Polly checks

use std::error::Error as StdError;
use std::fmt::Debug;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region, SdkConfig, retry::RetryConfig, timeout::TimeoutConfig};
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::{display::DisplayErrorContext, metadata::ProvideErrorMetadata};
use credcheck_config::AwsConfig;
use secrecy::{ExposeSecret, SecretString};

use super::CredentialSummary;
use crate::{
    credential::{mask, require, require_len},
    diagnostic::Failure,
    error::ProbeError,
};

const ACCESS_KEY_FIELD: &str = "AWS_ACCESS_KEY_ID";
const SECRET_KEY_FIELD: &str = "AWS_SECRET_ACCESS_KEY";
const ACCESS_KEY_LEN: usize = 20;
const SECRET_KEY_LEN: usize = 40;

pub const MISSING_KEY_HINTS: &[&str] = &[
    "Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY in your environment or .env file",
    "Or set aws.access_key_id and aws.secret_access_key in the config file",
];

pub const MALFORMED_KEY_HINTS: &[&str] = &[
    "AWS access key ids are 20 characters and secret keys are 40",
    "Check for any extra spaces or characters in your .env file",
    "Copy both values again from the AWS Console",
];

/// AWS credentials plus the client settings every AWS probe shares
#[derive(Debug, Clone)]
pub struct AwsSession {
    access_key_id: Option<SecretString>,
    secret_access_key: Option<SecretString>,
    region: String,
    endpoint_url: Option<String>,
    timeout: Duration,
}

impl AwsSession {
    pub fn new(config: &AwsConfig, timeout: Duration) -> Self {
        Self {
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            region: config.region.clone(),
            endpoint_url: config
                .endpoint_url
                .as_ref()
                .map(|url| url.as_str().trim_end_matches('/').to_owned()),
            timeout,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Presence and length of the key pair
    pub fn validate_format(&self) -> Result<CredentialSummary, Failure> {
        let access_key = require(self.access_key_id.as_ref(), ACCESS_KEY_FIELD)?;
        let secret_key = require(self.secret_access_key.as_ref(), SECRET_KEY_FIELD)?;

        require_len(access_key, ACCESS_KEY_FIELD, ACCESS_KEY_LEN)?;
        require_len(secret_key, SECRET_KEY_FIELD, SECRET_KEY_LEN)?;

        Ok(vec![
            ("Access Key", mask(access_key)),
            ("Secret Key", mask(secret_key)),
            ("Region", self.region.clone()),
        ])
    }

    /// Build an SDK config pinned to the explicit credentials
    ///
    /// Retries are disabled so each probe is exactly one request.
    pub async fn sdk_config(&self) -> Result<SdkConfig, ProbeError> {
        let access_key = self
            .access_key_id
            .as_ref()
            .ok_or(ProbeError::MissingCredential(ACCESS_KEY_FIELD))?;
        let secret_key = self
            .secret_access_key
            .as_ref()
            .ok_or(ProbeError::MissingCredential(SECRET_KEY_FIELD))?;

        let credentials = aws_credential_types::Credentials::new(
            access_key.expose_secret(),
            secret_key.expose_secret(),
            None, // session token
            None, // expiry
            "credcheck",
        );

        let timeouts = TimeoutConfig::builder()
            .connect_timeout(self.timeout)
            .operation_timeout(self.timeout)
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeouts);

        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }

        Ok(loader.load().await)
    }
}

/// Convert an SDK failure into a probe error, keeping the modeled error code
pub fn sdk_failure<E, R>(err: &SdkError<E, R>) -> ProbeError
where
    E: ProvideErrorMetadata + StdError + 'static,
    R: Debug,
{
    if let Some(service_err) = err.as_service_error()
        && let Some(code) = service_err.code()
    {
        return ProbeError::Service {
            code: code.to_owned(),
            message: service_err.message().unwrap_or_default().to_owned(),
        };
    }

    ProbeError::Transport(DisplayErrorContext(err).to_string())
}
