use thiserror::Error;

/// Errors raised while a live probe is in flight
///
/// Each check classifies these into a [`crate::Diagnostic`]; none of them
/// abort the run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request never produced a response (DNS, TLS, timeout)
    #[error("request failed: {0}")]
    Transport(String),

    /// HTTP provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Http { status: u16, message: String },

    /// SDK provider answered with a modeled error code
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// Provider answered successfully but the payload is unusable
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Probe was reached without a credential that validation should have caught
    #[error("credential not configured: {0}")]
    MissingCredential(&'static str),

    /// Audio was received but could not be saved
    #[error("failed to write audio file: {0}")]
    Artifact(#[from] std::io::Error),
}

impl ProbeError {
    /// HTTP status of an HTTP provider error
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error code of an SDK service error
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
