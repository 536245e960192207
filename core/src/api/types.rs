//! API Types
//!
//! Request/response types for the HTTP API. Everything is a string on the
//! wire; conversion into the typed values happens here.

use cohort_entity::{
    Ciphertext, KeyId, Modulus, Proposal, ProposalId, ReKeyToken, Record, RecordDetails,
    RecordId, RekeyedResult, SubjectIds,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Records
// ============================================================================

/// Mutable record fields as sent by callers
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    pub display_name: String,
    /// Ciphertext of the pre-existing conditions attribute
    pub condition: String,
    pub diagnosis_id: String,
    pub status_id: String,
    pub key_id: String,
}

impl From<RecordFields> for RecordDetails {
    fn from(fields: RecordFields) -> Self {
        RecordDetails {
            display_name: fields.display_name,
            condition: Ciphertext::new(fields.condition),
            diagnosis_id: fields.diagnosis_id,
            status_id: fields.status_id,
            key_id: KeyId::new(fields.key_id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub id: String,
    #[serde(flatten)]
    pub fields: RecordFields,
}

/// Half-open id range; a missing bound is open on that side
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: String,
    pub display_name: String,
    pub condition: String,
    pub diagnosis_id: String,
    pub status_id: String,
    pub key_id: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        let details = record.details().clone();
        Self {
            id: record.id().to_string(),
            display_name: details.display_name,
            condition: details.condition.into_inner(),
            diagnosis_id: details.diagnosis_id,
            status_id: details.status_id,
            key_id: details.key_id.into_inner(),
        }
    }
}

// ============================================================================
// Proposals
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    pub id: String,
    pub requester_id: String,
    pub requested_id: String,
    /// Comma-separated subject record ids, e.g. "PATIENT1,PATIENT2"
    pub subject_ids: String,
    pub key_id: String,
    pub modulus: String,
}

impl CreateProposalRequest {
    pub fn subjects(&self) -> SubjectIds {
        SubjectIds::parse(&self.subject_ids)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
    pub id: String,
    pub requester_id: String,
    pub requested_id: String,
    pub subject_ids: Vec<String>,
    pub key_id: String,
    pub value: String,
}

impl From<Proposal> for ProposalResponse {
    fn from(proposal: Proposal) -> Self {
        Self {
            id: proposal.id().to_string(),
            requester_id: proposal.requester_id().to_string(),
            requested_id: proposal.requested_id().to_string(),
            subject_ids: proposal
                .subject_ids()
                .iter()
                .map(|id| id.to_string())
                .collect(),
            key_id: proposal.key_id().to_string(),
            value: proposal.value().as_str().to_string(),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResultRequest {
    pub proposal_id: String,
    pub first_token: String,
    pub second_token: String,
    pub key_id: String,
    pub modulus: String,
}

/// Typed arguments of a result creation
pub struct ResultArgs {
    pub proposal_id: ProposalId,
    pub first_token: ReKeyToken,
    pub second_token: ReKeyToken,
    pub key_id: KeyId,
    pub modulus: Modulus,
}

impl From<CreateResultRequest> for ResultArgs {
    fn from(req: CreateResultRequest) -> Self {
        Self {
            proposal_id: ProposalId::new(req.proposal_id),
            first_token: ReKeyToken::new(req.first_token),
            second_token: ReKeyToken::new(req.second_token),
            key_id: KeyId::new(req.key_id),
            modulus: Modulus::new(req.modulus),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub id: String,
    pub proposal_id: String,
    pub key_id: String,
    pub value: String,
}

impl From<RekeyedResult> for ResultResponse {
    fn from(result: RekeyedResult) -> Self {
        Self {
            id: result.id().to_string(),
            proposal_id: result.proposal_id().to_string(),
            key_id: result.key_id().to_string(),
            value: result.value().as_str().to_string(),
        }
    }
}

// ============================================================================
// Common
// ============================================================================

/// Returned by create endpoints
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new("internal", msg)
    }
}
