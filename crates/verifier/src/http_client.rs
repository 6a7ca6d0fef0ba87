use std::time::Duration;

use reqwest::Client;

use crate::error::ProbeError;

/// HTTP client shared by the `OpenAI` and `ElevenLabs` probes
///
/// Every request is bounded by `timeout`; connection setup gets the same
/// budget so an unreachable host fails as fast as a slow one.
pub fn http_client(timeout: Duration) -> Result<Client, ProbeError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .user_agent(concat!("credcheck/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProbeError::Transport(format!("failed to build HTTP client: {e}")))
}
