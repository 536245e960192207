use cohort_entity::{Record, RecordDetails, RecordId};
use log::{info, warn};

use super::{Contract, DecodePolicy};
use crate::errors::{ContractError, Result};
use crate::ledger::{Keyspace, Ledger, RangeScan};
use crate::oracle::CryptoOracle;

const KIND: &str = "record";

impl<L: Ledger, O: CryptoOracle> Contract<L, O> {
    /// Write a subject record at `id`. An existing record is overwritten.
    pub fn create_record(&self, id: RecordId, details: RecordDetails) -> Result<()> {
        let record = Record::new(id, details)?;
        self.store(Keyspace::Records, KIND, record.id().as_str(), record.encode())?;
        info!("Record {} created", record.id());
        Ok(())
    }

    pub fn find_record(&self, id: &RecordId) -> Result<Record> {
        self.load(Keyspace::Records, KIND, id.as_str(), |bytes| {
            Record::decode(id.clone(), bytes)
        })
    }

    /// Replace every mutable field of an existing record.
    ///
    /// Read-modify-write without a version check: the last writer wins.
    pub fn update_record(&self, id: &RecordId, details: RecordDetails) -> Result<()> {
        let mut record = self.find_record(id)?;
        record.replace_details(details);
        self.store(Keyspace::Records, KIND, id.as_str(), record.encode())?;
        info!("Record {} updated", id);
        Ok(())
    }

    /// Records with ids in `[first, last)`, ascending.
    ///
    /// An empty bound is open on that side.
    pub fn all_records(&self, first: &RecordId, last: &RecordId) -> Result<RecordScan<'_>> {
        let rows = self
            .ledger
            .range_scan(Keyspace::Records, first.as_str(), last.as_str())?;

        Ok(RecordScan {
            rows,
            policy: self.decode_policy,
        })
    }
}

/// Lazy record iterator returned by [`Contract::all_records`].
///
/// Holds the ledger cursor until it is exhausted or dropped.
pub struct RecordScan<'a> {
    rows: RangeScan<'a>,
    policy: DecodePolicy,
}

impl RecordScan<'_> {
    fn decode_row(&self, key: Vec<u8>, value: &[u8]) -> Result<Record> {
        let id = match String::from_utf8(key) {
            Ok(id) => RecordId::from(id),
            Err(e) => {
                let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
                return Err(ContractError::Decode {
                    kind: KIND,
                    id: lossy,
                    reason: "key is not valid UTF-8".to_string(),
                });
            }
        };

        match Record::decode(id.clone(), value) {
            Ok(record) => Ok(record),
            Err(e) => match self.policy {
                DecodePolicy::Strict => Err(ContractError::Decode {
                    kind: KIND,
                    id: id.into_inner(),
                    reason: e.to_string(),
                }),
                DecodePolicy::Lenient => {
                    warn!("Record {} failed to decode, yielding zero value: {}", id, e);
                    Ok(Record::zeroed(id))
                }
            },
        }
    }
}

impl Iterator for RecordScan<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(
            row.map_err(ContractError::from)
                .and_then(|(key, value)| self.decode_row(key, &value)),
        )
    }
}
