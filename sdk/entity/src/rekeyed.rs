use serde::{Deserialize, Serialize};

use crate::values::{Ciphertext, KeyId, ProposalId, ResultId};

/// Literal prefix of every result key.
pub const RESULT_ID_PREFIX: &str = "RESULT";

impl ResultId {
    /// `"RESULT"` followed by the first run of ASCII digits in the proposal id.
    ///
    /// Proposal ids sharing that run map to the same result key ("P7" and
    /// "X7y" both give "RESULT7"); an id without digits gives "RESULT".
    pub fn derive(proposal_id: &ProposalId) -> Self {
        let digits: String = proposal_id
            .as_str()
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        Self::new(format!("{RESULT_ID_PREFIX}{digits}"))
    }
}

/// A proposal's mean, re-keyed for the destination key owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RekeyedResult {
    #[serde(skip)]
    id: ResultId,
    #[serde(rename = "proposalID")]
    proposal_id: ProposalId,
    #[serde(rename = "keyID")]
    key_id: KeyId,
    value: Ciphertext,
}

impl RekeyedResult {
    /// Builds the result for `proposal_id`; its id is always derived.
    pub fn new(proposal_id: ProposalId, key_id: KeyId, value: Ciphertext) -> Self {
        Self {
            id: ResultId::derive(&proposal_id),
            proposal_id,
            key_id,
            value,
        }
    }

    pub fn id(&self) -> &ResultId {
        &self.id
    }

    pub fn proposal_id(&self) -> &ProposalId {
        &self.proposal_id
    }

    /// Destination key
    pub fn key_id(&self) -> &KeyId {
        &self.key_id
    }

    pub fn value(&self) -> &Ciphertext {
        &self.value
    }

    pub fn decode(id: ResultId, bytes: &[u8]) -> serde_json::Result<Self> {
        let mut result: Self = serde_json::from_slice(bytes)?;
        result.id = id;
        Ok(result)
    }

    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
