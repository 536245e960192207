//! API Handlers
//!
//! Request handlers for the HTTP API. Contract calls block on RocksDB and on
//! the oracle, so each one runs on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cohort_entity::{KeyId, Modulus, ProposalId, RecordDetails, RecordId, ResultId};
use log::{error, warn};
use tokio::task::JoinError;

use super::types::*;
use crate::contract::Contract;
use crate::errors::ContractError;
use crate::ledger::RocksDbLedger;
use crate::oracle::OracleClient;

/// Contract as deployed by the node binary
pub type NodeContract = Contract<RocksDbLedger, OracleClient>;

// ============================================================================
// Shared State
// ============================================================================

#[derive(Clone)]
pub struct ApiState {
    pub contract: Arc<NodeContract>,
    pub start_time: std::time::Instant,
}

impl ApiState {
    pub fn new(contract: Arc<NodeContract>) -> Self {
        Self {
            contract,
            start_time: std::time::Instant::now(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

pub enum ApiError {
    Contract(ContractError),
    Join(JoinError),
}

/// HTTP status for a contract error
pub fn status_for(err: &ContractError) -> StatusCode {
    match err {
        ContractError::NotFound(_) => StatusCode::NOT_FOUND,
        ContractError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        ContractError::Oracle(_) => StatusCode::BAD_GATEWAY,
        ContractError::Decode { .. }
        | ContractError::Encode { .. }
        | ContractError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Contract(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!("Request failed: {}", err);
                } else {
                    warn!("Request rejected: {}", err);
                }
                (status, Json(ErrorResponse::new(err.kind(), err.to_string()))).into_response()
            }
            ApiError::Join(err) => {
                error!("Blocking task failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal("Operation aborted")),
                )
                    .into_response()
            }
        }
    }
}

/// Run a contract call on the blocking pool
async fn run<T, F>(state: &ApiState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&NodeContract) -> Result<T, ContractError> + Send + 'static,
{
    let contract = state.contract.clone();
    tokio::task::spawn_blocking(move || op(contract.as_ref()))
        .await
        .map_err(ApiError::Join)?
        .map_err(ApiError::Contract)
}

// ============================================================================
// Health
// ============================================================================

pub async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// ============================================================================
// Records
// ============================================================================

pub async fn create_record(
    State(state): State<ApiState>,
    Json(req): Json<CreateRecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = RecordId::new(req.id);
    let details = RecordDetails::from(req.fields);
    let created = id.to_string();

    run(&state, move |contract| contract.create_record(id, details)).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: created })))
}

pub async fn update_record(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(fields): Json<RecordFields>,
) -> Result<impl IntoResponse, ApiError> {
    let id = RecordId::new(id);
    let details = RecordDetails::from(fields);

    run(&state, move |contract| contract.update_record(&id, details)).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_record(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>, ApiError> {
    let id = RecordId::new(id);
    let record = run(&state, move |contract| contract.find_record(&id)).await?;
    Ok(Json(record.into()))
}

/// Records in `[first, last)`. Fails on the first row that does not decode
/// unless the node runs with the lenient decode policy.
pub async fn list_records(
    State(state): State<ApiState>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<Vec<RecordResponse>>, ApiError> {
    let first = RecordId::new(range.first);
    let last = RecordId::new(range.last);

    let records = run(&state, move |contract| {
        contract
            .all_records(&first, &last)?
            .map(|row| row.map(RecordResponse::from))
            .collect::<Result<Vec<_>, _>>()
    })
    .await?;

    Ok(Json(records))
}

// ============================================================================
// Proposals
// ============================================================================

pub async fn create_proposal(
    State(state): State<ApiState>,
    Json(req): Json<CreateProposalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let subjects = req.subjects();
    let id = ProposalId::new(req.id);
    let created = id.to_string();
    let key_id = KeyId::new(req.key_id);
    let modulus = Modulus::new(req.modulus);
    let (requester_id, requested_id) = (req.requester_id, req.requested_id);

    run(&state, move |contract| {
        contract.create_proposal(id, requester_id, requested_id, subjects, key_id, &modulus)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: created })))
}

pub async fn get_proposal(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ProposalResponse>, ApiError> {
    let id = ProposalId::new(id);
    let proposal = run(&state, move |contract| contract.find_proposal(&id)).await?;
    Ok(Json(proposal.into()))
}

// ============================================================================
// Results
// ============================================================================

pub async fn create_result(
    State(state): State<ApiState>,
    Json(req): Json<CreateResultRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let args = ResultArgs::from(req);

    let id = run(&state, move |contract| {
        contract.create_result(
            &args.proposal_id,
            &args.first_token,
            &args.second_token,
            args.key_id,
            &args.modulus,
        )
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: id.into_inner(),
        }),
    ))
}

pub async fn get_result(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ResultResponse>, ApiError> {
    let id = ResultId::new(id);
    let result = run(&state, move |contract| contract.find_result(&id)).await?;
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerError;
    use crate::oracle::OracleError;
    use cohort_entity::EntityError;

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_for(&ContractError::NotFound("P1".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&EntityError::EmptyIdentifier("record id").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&OracleError::Transport("refused".to_string()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&LedgerError::Poisoned.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
