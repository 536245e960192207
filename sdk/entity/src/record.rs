use serde::{Deserialize, Serialize};

use crate::errors::EntityError;
use crate::values::{Ciphertext, KeyId, RecordId};

/// The mutable part of a subject record.
///
/// Field names on the wire match the ledgers written by the first deployment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordDetails {
    #[serde(rename = "name")]
    pub display_name: String,
    /// Encrypted pre-existing conditions attribute
    #[serde(rename = "preExistingConditions")]
    pub condition: Ciphertext,
    #[serde(rename = "diagnosisID")]
    pub diagnosis_id: String,
    #[serde(rename = "statusID")]
    pub status_id: String,
    /// Key the `condition` ciphertext was produced under
    #[serde(rename = "keyID")]
    pub key_id: KeyId,
}

/// A subject's encrypted attribute plus clinical metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    details: RecordDetails,
}

impl Record {
    pub fn new(id: RecordId, details: RecordDetails) -> Result<Self, EntityError> {
        if id.is_empty() {
            return Err(EntityError::EmptyIdentifier("record id"));
        }
        Ok(Self { id, details })
    }

    /// Record with every field at its zero value.
    ///
    /// Only produced by a lenient range scan over rows that failed to decode.
    pub fn zeroed(id: RecordId) -> Self {
        Self {
            id,
            details: RecordDetails::default(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn details(&self) -> &RecordDetails {
        &self.details
    }

    pub fn display_name(&self) -> &str {
        &self.details.display_name
    }

    pub fn condition(&self) -> &Ciphertext {
        &self.details.condition
    }

    pub fn diagnosis_id(&self) -> &str {
        &self.details.diagnosis_id
    }

    pub fn status_id(&self) -> &str {
        &self.details.status_id
    }

    pub fn key_id(&self) -> &KeyId {
        &self.details.key_id
    }

    /// Replace every mutable field at once. The id is kept.
    pub fn replace_details(&mut self, details: RecordDetails) {
        self.details = details;
    }

    pub fn decode(id: RecordId, bytes: &[u8]) -> serde_json::Result<Self> {
        let details = serde_json::from_slice(bytes)?;
        Ok(Self { id, details })
    }

    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.details)
    }
}
