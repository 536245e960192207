use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::errors::EntityError;
use crate::values::{Ciphertext, KeyId, ProposalId, RecordId};

const SUBJECT_SEPARATOR: char = ',';

/// Ordered subject ids referenced by a proposal.
///
/// Duplicates are kept: a subject listed twice is weighted twice in the mean.
/// On the wire this is a single comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectIds(Vec<RecordId>);

impl SubjectIds {
    /// Split a comma-separated list. Segments are not trimmed; an empty input
    /// gives an empty list.
    pub fn parse(joined: &str) -> Self {
        if joined.is_empty() {
            return Self::default();
        }
        Self(joined.split(SUBJECT_SEPARATOR).map(RecordId::from).collect())
    }

    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(RecordId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SubjectIds {
    type Item = &'a RecordId;
    type IntoIter = std::slice::Iter<'a, RecordId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for SubjectIds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.joined())
    }
}

impl<'de> Deserialize<'de> for SubjectIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct JoinedVisitor;

        impl Visitor<'_> for JoinedVisitor {
            type Value = SubjectIds;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a comma-separated list of subject ids")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SubjectIds, E> {
                Ok(SubjectIds::parse(v))
            }
        }

        deserializer.deserialize_str(JoinedVisitor)
    }
}

/// An aggregation request together with its computed mean.
///
/// There is no pending state: a proposal only exists once its value is known,
/// and it is never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(skip)]
    id: ProposalId,
    #[serde(rename = "requesterID")]
    requester_id: String,
    #[serde(rename = "requestedID")]
    requested_id: String,
    #[serde(rename = "patientsIDs")]
    subject_ids: SubjectIds,
    #[serde(rename = "keyID")]
    key_id: KeyId,
    value: Ciphertext,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        requester_id: String,
        requested_id: String,
        subject_ids: SubjectIds,
        key_id: KeyId,
        value: Ciphertext,
    ) -> Result<Self, EntityError> {
        if id.is_empty() {
            return Err(EntityError::EmptyIdentifier("proposal id"));
        }
        if subject_ids.is_empty() {
            return Err(EntityError::EmptySubjectList(id.into_inner()));
        }
        Ok(Self {
            id,
            requester_id,
            requested_id,
            subject_ids,
            key_id,
            value,
        })
    }

    pub fn id(&self) -> &ProposalId {
        &self.id
    }

    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    pub fn requested_id(&self) -> &str {
        &self.requested_id
    }

    pub fn subject_ids(&self) -> &SubjectIds {
        &self.subject_ids
    }

    pub fn key_id(&self) -> &KeyId {
        &self.key_id
    }

    /// Mean ciphertext returned by the oracle
    pub fn value(&self) -> &Ciphertext {
        &self.value
    }

    pub fn decode(id: ProposalId, bytes: &[u8]) -> serde_json::Result<Self> {
        let mut proposal: Self = serde_json::from_slice(bytes)?;
        proposal.id = id;
        Ok(proposal)
    }

    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_duplicates() {
        let ids = SubjectIds::parse("s2,s1,s2");
        let raw: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
        assert_eq!(raw, vec!["s2", "s1", "s2"]);
    }

    #[test]
    fn parse_does_not_trim() {
        let ids = SubjectIds::parse("s1, s2,");
        let raw: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
        assert_eq!(raw, vec!["s1", " s2", ""]);
    }

    #[test]
    fn parse_empty_is_empty() {
        assert!(SubjectIds::parse("").is_empty());
    }

    #[test]
    fn new_rejects_empty_subjects() {
        let err = Proposal::new(
            ProposalId::new("P1"),
            "req".to_string(),
            "owner".to_string(),
            SubjectIds::default(),
            KeyId::new("k"),
            Ciphertext::new("1"),
        )
        .unwrap_err();
        assert_eq!(err, EntityError::EmptySubjectList("P1".to_string()));
    }

    #[test]
    fn subjects_serialize_joined() {
        let proposal = Proposal::new(
            ProposalId::new("P1"),
            "req".to_string(),
            "owner".to_string(),
            SubjectIds::parse("s1,s2"),
            KeyId::new("k"),
            Ciphertext::new("99"),
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&proposal.encode().unwrap()).unwrap();
        assert_eq!(json["patientsIDs"], "s1,s2");
        assert_eq!(json["value"], "99");
        assert!(json.get("id").is_none());
    }
}
