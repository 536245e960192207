//! Crypto oracle
//!
//! All homomorphic arithmetic happens behind this boundary. The contract
//! hands over ciphertexts, tokens and the modulus as text and gets text back;
//! it never reduces, exponentiates or blinds anything itself.
use thiserror::Error;

pub mod http;
pub mod mock;

pub use http::{HttpOracle, HttpOracleConfig};
pub use mock::MockOracle;

use crate::config::{OracleConfig, OracleMode};

#[derive(Error, Debug)]
pub enum OracleError {
    /// The oracle answered and refused the request
    #[error("{operation} rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    /// The oracle could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The oracle answered with something that is not a ciphertext
    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    /// An input could not be interpreted (modulus, ciphertext or token)
    #[error("Invalid oracle input: {0}")]
    InvalidInput(String),
}

pub trait CryptoOracle {
    /// Encrypted mean of `ciphertexts` under `modulus`. Input order is passed
    /// through unchanged.
    fn compute_modular_mean(&self, modulus: &str, ciphertexts: &[&str])
    -> Result<String, OracleError>;

    /// Re-key `ciphertext` into the domain authorized by the token pair.
    fn key_switch(
        &self,
        modulus: &str,
        first_token: &str,
        second_token: &str,
        ciphertext: &str,
    ) -> Result<String, OracleError>;
}

/// Oracle selected by configuration.
pub enum OracleClient {
    Http(HttpOracle),
    Mock(MockOracle),
}

impl OracleClient {
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        match config.mode {
            OracleMode::Http => {
                let http = HttpOracle::new(HttpOracleConfig {
                    base_url: config.url.clone(),
                    timeout: std::time::Duration::from_secs(config.timeout_secs),
                })?;
                log::info!("Using HTTP oracle at {}", config.url);
                Ok(OracleClient::Http(http))
            }
            OracleMode::Mock => {
                log::warn!("Using mock oracle: values are NOT encrypted");
                Ok(OracleClient::Mock(MockOracle::new()))
            }
        }
    }
}

impl CryptoOracle for OracleClient {
    fn compute_modular_mean(
        &self,
        modulus: &str,
        ciphertexts: &[&str],
    ) -> Result<String, OracleError> {
        match self {
            OracleClient::Http(oracle) => oracle.compute_modular_mean(modulus, ciphertexts),
            OracleClient::Mock(oracle) => oracle.compute_modular_mean(modulus, ciphertexts),
        }
    }

    fn key_switch(
        &self,
        modulus: &str,
        first_token: &str,
        second_token: &str,
        ciphertext: &str,
    ) -> Result<String, OracleError> {
        match self {
            OracleClient::Http(oracle) => {
                oracle.key_switch(modulus, first_token, second_token, ciphertext)
            }
            OracleClient::Mock(oracle) => {
                oracle.key_switch(modulus, first_token, second_token, ciphertext)
            }
        }
    }
}
