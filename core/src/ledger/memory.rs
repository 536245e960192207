use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

use super::{KeyValue, Keyspace, Ledger, LedgerError, RangeScan, is_empty_range};

/// In-process ledger for tests and throwaway dev runs.
///
/// Keys are kept sorted per keyspace so range scans match RocksDB's order.
/// Unlike RocksDB, a range scan here is not lazy: the matching rows are
/// copied out under the read lock when the scan is created.
#[derive(Default)]
pub struct MemoryLedger {
    spaces: RwLock<HashMap<Keyspace, BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all keyspaces.
    pub fn len(&self) -> Result<usize, LedgerError> {
        let spaces = self.spaces.read().map_err(|_| LedgerError::Poisoned)?;
        Ok(spaces.values().map(BTreeMap::len).sum())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }
}

impl Ledger for MemoryLedger {
    fn put(&self, space: Keyspace, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        let mut spaces = self.spaces.write().map_err(|_| LedgerError::Poisoned)?;
        spaces
            .entry(space)
            .or_default()
            .insert(key.as_bytes().to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, space: Keyspace, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let spaces = self.spaces.read().map_err(|_| LedgerError::Poisoned)?;
        Ok(spaces
            .get(&space)
            .and_then(|entries| entries.get(key.as_bytes()))
            .cloned())
    }

    fn range_scan(
        &self,
        space: Keyspace,
        first: &str,
        last: &str,
    ) -> Result<RangeScan<'_>, LedgerError> {
        if is_empty_range(first, last) {
            return Ok(Box::new(std::iter::empty()));
        }

        let lower = Bound::Included(first.as_bytes().to_vec());
        let upper = if last.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(last.as_bytes().to_vec())
        };

        // Eager snapshot under the read lock; the lock is not held by the iterator.
        let spaces = self.spaces.read().map_err(|_| LedgerError::Poisoned)?;
        let rows: Vec<KeyValue> = match spaces.get(&space) {
            Some(entries) => entries
                .range((lower, upper))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            None => Vec::new(),
        };

        Ok(Box::new(rows.into_iter().map(Ok)))
    }
}
