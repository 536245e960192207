//! Ledger abstraction
//!
//! Decouples the contract from the durable key-value store. Keys are entity
//! ids as UTF-8; values are opaque bytes. Writes are last-writer-wins and no
//! backend offers compare-and-swap, so a read followed by a write is never
//! atomic.
use thiserror::Error;

pub mod memory;
pub mod rocks;

pub use memory::MemoryLedger;
pub use rocks::RocksDbLedger;

/// Disjoint key namespaces, one per entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyspace {
    Records,
    Proposals,
    Results,
}

impl Keyspace {
    pub const ALL: [Keyspace; 3] = [Keyspace::Records, Keyspace::Proposals, Keyspace::Results];

    pub fn name(self) -> &'static str {
        match self {
            Keyspace::Records => "records",
            Keyspace::Proposals => "proposals",
            Keyspace::Results => "results",
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger backend error: {0}")]
    Backend(String),

    #[error("Keyspace {0} is missing")]
    MissingKeyspace(&'static str),

    #[error("Ledger lock poisoned")]
    Poisoned,
}

impl From<rocksdb::Error> for LedgerError {
    fn from(err: rocksdb::Error) -> Self {
        LedgerError::Backend(err.into_string())
    }
}

pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Lazy, forward-only scan. Dropping it releases the underlying cursor.
pub type RangeScan<'a> = Box<dyn Iterator<Item = Result<KeyValue, LedgerError>> + 'a>;

pub trait Ledger {
    fn put(&self, space: Keyspace, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// `None` when nothing is stored at `key`.
    fn get(&self, space: Keyspace, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Entries with keys in `[first, last)` in ascending byte order.
    ///
    /// An empty `first` or `last` leaves that side unbounded. A bounded range
    /// with `first >= last` is empty.
    fn range_scan(&self, space: Keyspace, first: &str, last: &str)
    -> Result<RangeScan<'_>, LedgerError>;
}

/// True when the bounded range `[first, last)` cannot contain any key.
pub(crate) fn is_empty_range(first: &str, last: &str) -> bool {
    !last.is_empty() && first >= last
}
