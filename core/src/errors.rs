//! Error taxonomy of the contract operations.
//!
//! Every operation surfaces the first failure it meets and commits nothing
//! after it. Ledger and oracle failures keep their own enums and convert in
//! with `?`.
use cohort_entity::EntityError;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::oracle::OracleError;

#[derive(Error, Debug)]
pub enum ContractError {
    /// The referenced entity is not in the ledger
    #[error("{0} does not exist")]
    NotFound(String),

    /// Stored bytes do not parse as the expected entity
    #[error("Failed to decode {kind} {id}: {reason}")]
    Decode {
        kind: &'static str,
        id: String,
        reason: String,
    },

    /// An entity could not be serialized for storage
    #[error("Failed to encode {kind} {id}: {reason}")]
    Encode {
        kind: &'static str,
        id: String,
        reason: String,
    },

    /// The ledger read or write failed
    #[error("Failed to read from or write to the ledger: {0}")]
    Persistence(#[from] LedgerError),

    /// The crypto oracle rejected or failed the request
    #[error("Oracle failure: {0}")]
    Oracle(#[from] OracleError),

    /// Caller input rejected before touching the ledger
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] EntityError),
}

impl ContractError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ContractError::NotFound(_) => "not_found",
            ContractError::Decode { .. } => "decode",
            ContractError::Encode { .. } => "encode",
            ContractError::Persistence(_) => "persistence",
            ContractError::Oracle(_) => "oracle",
            ContractError::InvalidArgument(_) => "invalid_argument",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContractError>;
