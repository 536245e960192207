//! Shared fixtures: a configurable oracle stub and a ledger that fails on demand.

use std::collections::HashMap;
use std::sync::Mutex;

use cohort_entity::{Ciphertext, KeyId, RecordDetails, RecordId};

use crate::contract::Contract;
use crate::ledger::{Keyspace, Ledger, LedgerError, MemoryLedger, RangeScan};
use crate::oracle::{CryptoOracle, OracleError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleCall {
    Mean {
        modulus: String,
        ciphertexts: Vec<String>,
    },
    KeySwitch {
        modulus: String,
        first_token: String,
        second_token: String,
        ciphertext: String,
    },
}

/// Answers only the inputs it was configured with; everything else is rejected.
#[derive(Default)]
pub struct StubOracle {
    means: HashMap<(String, Vec<String>), String>,
    switches: HashMap<(String, String, String, String), String>,
    calls: Mutex<Vec<OracleCall>>,
}

impl StubOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mean(mut self, modulus: &str, ciphertexts: &[&str], answer: &str) -> Self {
        let key = (
            modulus.to_string(),
            ciphertexts.iter().map(|c| c.to_string()).collect(),
        );
        self.means.insert(key, answer.to_string());
        self
    }

    pub fn with_key_switch(
        mut self,
        modulus: &str,
        first_token: &str,
        second_token: &str,
        ciphertext: &str,
        answer: &str,
    ) -> Self {
        let key = (
            modulus.to_string(),
            first_token.to_string(),
            second_token.to_string(),
            ciphertext.to_string(),
        );
        self.switches.insert(key, answer.to_string());
        self
    }

    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CryptoOracle for StubOracle {
    fn compute_modular_mean(
        &self,
        modulus: &str,
        ciphertexts: &[&str],
    ) -> Result<String, OracleError> {
        let owned: Vec<String> = ciphertexts.iter().map(|c| c.to_string()).collect();
        self.calls.lock().unwrap().push(OracleCall::Mean {
            modulus: modulus.to_string(),
            ciphertexts: owned.clone(),
        });

        self.means
            .get(&(modulus.to_string(), owned))
            .cloned()
            .ok_or(OracleError::Rejected {
                operation: "mean",
                reason: "modulus mismatch".to_string(),
            })
    }

    fn key_switch(
        &self,
        modulus: &str,
        first_token: &str,
        second_token: &str,
        ciphertext: &str,
    ) -> Result<String, OracleError> {
        let key = (
            modulus.to_string(),
            first_token.to_string(),
            second_token.to_string(),
            ciphertext.to_string(),
        );
        self.calls.lock().unwrap().push(OracleCall::KeySwitch {
            modulus: key.0.clone(),
            first_token: key.1.clone(),
            second_token: key.2.clone(),
            ciphertext: key.3.clone(),
        });

        self.switches
            .get(&key)
            .cloned()
            .ok_or(OracleError::Rejected {
                operation: "key-switch",
                reason: "stale token".to_string(),
            })
    }
}

/// Wraps a [`MemoryLedger`]; reads or writes in one keyspace can be made to fail.
pub struct FailingLedger {
    pub inner: MemoryLedger,
    pub fail_gets_in: Option<Keyspace>,
    pub fail_puts_in: Option<Keyspace>,
}

impl FailingLedger {
    pub fn new(inner: MemoryLedger) -> Self {
        Self {
            inner,
            fail_gets_in: None,
            fail_puts_in: None,
        }
    }
}

impl Ledger for FailingLedger {
    fn put(&self, space: Keyspace, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        if self.fail_puts_in == Some(space) {
            return Err(LedgerError::Backend("disk full".to_string()));
        }
        self.inner.put(space, key, value)
    }

    fn get(&self, space: Keyspace, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if self.fail_gets_in == Some(space) {
            return Err(LedgerError::Backend("read timeout".to_string()));
        }
        self.inner.get(space, key)
    }

    fn range_scan(
        &self,
        space: Keyspace,
        first: &str,
        last: &str,
    ) -> Result<RangeScan<'_>, LedgerError> {
        if self.fail_gets_in == Some(space) {
            return Err(LedgerError::Backend("read timeout".to_string()));
        }
        self.inner.range_scan(space, first, last)
    }
}

pub fn details(name: &str, condition: &str, key_id: &str) -> RecordDetails {
    RecordDetails {
        display_name: name.to_string(),
        condition: Ciphertext::new(condition),
        diagnosis_id: "DIAG-1".to_string(),
        status_id: "ACTIVE".to_string(),
        key_id: KeyId::new(key_id),
    }
}

pub fn contract(oracle: StubOracle) -> Contract<MemoryLedger, StubOracle> {
    Contract::new(MemoryLedger::new(), oracle)
}

/// Contract with subjects `s1..s3` holding ciphertexts `c1..c3`.
pub fn seeded(oracle: StubOracle) -> Contract<MemoryLedger, StubOracle> {
    let contract = contract(oracle);
    for n in 1..=3 {
        contract
            .create_record(
                RecordId::new(format!("s{n}")),
                details(&format!("Subject {n}"), &format!("c{n}"), "custodian"),
            )
            .unwrap();
    }
    contract
}

/// Every key/value in a keyspace, in scan order.
pub fn dump<L: Ledger>(ledger: &L, space: Keyspace) -> Vec<(String, Vec<u8>)> {
    ledger
        .range_scan(space, "", "")
        .unwrap()
        .map(|row| {
            let (key, value) = row.unwrap();
            (String::from_utf8(key).unwrap(), value)
        })
        .collect()
}
