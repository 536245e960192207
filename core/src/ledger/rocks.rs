use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options, ReadOptions};
use std::path::Path;
use std::sync::Arc;

use super::{Keyspace, Ledger, LedgerError, RangeScan, is_empty_range};

/// A thread-safe wrapper around RocksDB, one column family per keyspace.
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
}

impl RocksDbLedger {
    /// Opens the database at the specified path, creating it if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let families = Keyspace::ALL
            .iter()
            .map(|space| ColumnFamilyDescriptor::new(space.name(), Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, families)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, space: Keyspace) -> Result<&ColumnFamily, LedgerError> {
        self.db
            .cf_handle(space.name())
            .ok_or(LedgerError::MissingKeyspace(space.name()))
    }
}

impl Ledger for RocksDbLedger {
    fn put(&self, space: Keyspace, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        let cf = self.cf(space)?;
        self.db.put_cf(cf, key.as_bytes(), value)?;
        Ok(())
    }

    fn get(&self, space: Keyspace, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let cf = self.cf(space)?;
        Ok(self.db.get_cf(cf, key.as_bytes())?)
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

        let cf = self.cf(space)?;

        let mut read_opts = ReadOptions::default();
        if !last.is_empty() {
            read_opts.set_iterate_upper_bound(last.as_bytes().to_vec());
        }

        let mode = if first.is_empty() {
            IteratorMode::Start
        } else {
            IteratorMode::From(first.as_bytes(), Direction::Forward)
        };

        let iter = self.db.iterator_cf_opt(cf, read_opts, mode).map(|item| {
            item.map(|(key, value)| (key.into_vec(), value.into_vec()))
                .map_err(LedgerError::from)
        });

        Ok(Box::new(iter))
    }
}
