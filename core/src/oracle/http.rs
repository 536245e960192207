//! HTTP Oracle Client
//!
//! Blocking JSON client for a remote crypto oracle service. Calls are made
//! from the blocking thread pool, never from the async reactor.
//!
//! ```text
//!   Contract ──▶ HttpOracle
//!                  │  POST {url}/mean        { modulus, ciphertexts }
//!                  │  POST {url}/key-switch  { modulus, firstToken, secondToken, ciphertext }
//!                  ▼
//!               Oracle service ──▶ { ciphertext }
//! ```

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CryptoOracle, OracleError};

#[derive(Debug, Clone)]
pub struct HttpOracleConfig {
    /// Base URL of the oracle service (e.g. "http://localhost:7070")
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7070".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MeanRequest<'a> {
    modulus: &'a str,
    ciphertexts: &'a [&'a str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeySwitchRequest<'a> {
    modulus: &'a str,
    first_token: &'a str,
    second_token: &'a str,
    ciphertext: &'a str,
}

#[derive(Debug, Deserialize)]
struct CiphertextResponse {
    ciphertext: String,
}

// ============================================================================
// Client
// ============================================================================

pub struct HttpOracle {
    client: Client,
    base_url: String,
}

impl HttpOracle {
    pub fn new(config: HttpOracleConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OracleError::Transport(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn call<T: Serialize>(
        &self,
        operation: &'static str,
        path: &str,
        body: &T,
    ) -> Result<String, OracleError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Oracle {} -> {}", operation, url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| OracleError::Transport(format!("{}: {}", operation, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(OracleError::Rejected {
                operation,
                reason: format!("HTTP {}: {}", status, detail),
            });
        }

        let parsed: CiphertextResponse = response
            .json()
            .map_err(|e| OracleError::MalformedResponse(format!("{}: {}", operation, e)))?;

        if parsed.ciphertext.is_empty() {
            return Err(OracleError::MalformedResponse(format!(
                "{}: empty ciphertext",
                operation
            )));
        }

        Ok(parsed.ciphertext)
    }
}

impl CryptoOracle for HttpOracle {
    fn compute_modular_mean(
        &self,
        modulus: &str,
        ciphertexts: &[&str],
    ) -> Result<String, OracleError> {
        self.call(
            "mean",
            "mean",
            &MeanRequest {
                modulus,
                ciphertexts,
            },
        )
    }

    fn key_switch(
        &self,
        modulus: &str,
        first_token: &str,
        second_token: &str,
        ciphertext: &str,
    ) -> Result<String, OracleError> {
        self.call(
            "key-switch",
            "key-switch",
            &KeySwitchRequest {
                modulus,
                first_token,
                second_token,
                ciphertext,
            },
        )
    }
}
