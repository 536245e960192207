//! Cohort core
//!
//! Orchestrates an encrypted mean over subject records held in a ledger:
//! records are aggregated into proposals through a homomorphic mean oracle,
//! and proposals are re-keyed into results for a different key owner.

pub mod api;
pub mod config;
pub mod contract;
pub mod errors;
pub mod ledger;
pub mod oracle;

pub use contract::{Contract, DecodePolicy, RecordScan};
pub use errors::ContractError;
pub use ledger::{Keyspace, Ledger, LedgerError, MemoryLedger, RocksDbLedger};
pub use oracle::{CryptoOracle, OracleClient, OracleError};

#[cfg(test)]
mod tests;
