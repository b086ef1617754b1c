use std::time::Duration;

use crate::core::errors::{LedgerError, Result};
use crate::core::traits::verifier::KeyVerifier;

/// Endpoint that accepts any valid API key and rejects everything else.
pub const DEFAULT_VERIFY_URL: &str = "https://api.openai.com/v1/models";

/// Timeout for the verification request.
const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Checks an API key against the provider with one authenticated GET.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    url: String,
    timeout: Duration,
}

impl HttpVerifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: VERIFY_TIMEOUT,
        }
    }

    /// Build a reqwest client with the configured timeout.
    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(format!("keyledger/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LedgerError::Transport {
                reason: format!("Failed to create HTTP client: {e}"),
            })
    }
}

impl Default for HttpVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_VERIFY_URL)
    }
}

impl KeyVerifier for HttpVerifier {
    /// Any 2xx status accepts the key.
    async fn verify(&self, secret: &str) -> Result<bool> {
        let client = self.build_client()?;
        let resp = client
            .get(&self.url)
            .bearer_auth(secret)
            .send()
            .await
            .map_err(|e| LedgerError::Transport {
                reason: format!("GET {} failed: {e}", self.url),
            })?;

        let status = resp.status();
        tracing::debug!(url = %self.url, %status, "key verification response");
        Ok(status.is_success())
    }
}
