//! Cohort entity types
//!
//! The three entities kept in the ledger, plus the string newtypes that keep
//! identifiers, ciphertexts and re-keying tokens from being mixed up.
//!
//! ```text
//!   Record ──(subject ids)──▶ Proposal ──(proposal id)──▶ RekeyedResult
//!   ciphertext under          mean ciphertext             ciphertext under
//!   custodian key             under proposal key          destination key
//! ```
//!
//! Values are stored as JSON using the field names of the ledgers already in
//! production. The entity id is the ledger key and is never part of the value.

pub mod errors;
pub mod proposal;
pub mod record;
pub mod rekeyed;
pub mod values;

pub use errors::EntityError;
pub use proposal::{Proposal, SubjectIds};
pub use record::{Record, RecordDetails};
pub use rekeyed::{RESULT_ID_PREFIX, RekeyedResult};
pub use values::{Ciphertext, KeyId, Modulus, ProposalId, ReKeyToken, RecordId, ResultId};
