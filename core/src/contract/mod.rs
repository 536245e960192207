//! Contract operations
//!
//! ```text
//!   create_record ──▶ [records] ──▶ create_proposal ──▶ [proposals] ──▶ create_result ──▶ [results]
//!                                    │ mean oracle                        │ key-switch oracle
//! ```
//!
//! Each operation is one sequential pass over the ledger. Nothing is cached
//! between calls and no locks are taken: concurrent `update_record` calls can
//! clobber each other, and proposals sharing a digit run write the same result.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{ContractError, Result};
use crate::ledger::{Keyspace, Ledger};
use crate::oracle::CryptoOracle;

mod proposal;
mod registry;
mod result;

pub use registry::RecordScan;

/// What a range scan does with a row that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Yield a decode error for the row
    #[default]
    Strict,
    /// Yield a zero-valued record for the row (legacy ledgers)
    Lenient,
}

pub struct Contract<L, O> {
    ledger: L,
    oracle: O,
    decode_policy: DecodePolicy,
}

impl<L: Ledger, O: CryptoOracle> Contract<L, O> {
    pub fn new(ledger: L, oracle: O) -> Self {
        Self {
            ledger,
            oracle,
            decode_policy: DecodePolicy::default(),
        }
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.decode_policy
    }

    fn load<T>(
        &self,
        space: Keyspace,
        kind: &'static str,
        key: &str,
        decode: impl FnOnce(&[u8]) -> serde_json::Result<T>,
    ) -> Result<T> {
        let bytes = self
            .ledger
            .get(space, key)?
            .ok_or_else(|| ContractError::NotFound(key.to_string()))?;

        decode(&bytes).map_err(|e| ContractError::Decode {
            kind,
            id: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn store(
        &self,
        space: Keyspace,
        kind: &'static str,
        key: &str,
        encoded: serde_json::Result<Vec<u8>>,
    ) -> Result<()> {
        let bytes = encoded.map_err(|e| ContractError::Encode {
            kind,
            id: key.to_string(),
            reason: e.to_string(),
        })?;

        self.ledger.put(space, key, &bytes)?;
        debug!("Stored {} {} ({} bytes)", kind, key, bytes.len());
        Ok(())
    }
}
