use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::api::{ApiState, create_router};
use crate::contract::Contract;
use crate::ledger::RocksDbLedger;
use crate::oracle::{MockOracle, OracleClient};

/// Router over a fresh ledger and the mock oracle; the dir lives as long as the router
fn test_router() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let ledger = RocksDbLedger::open(dir.path()).unwrap();
    let contract = Contract::new(ledger, OracleClient::Mock(MockOracle::new()));
    (dir, create_router(ApiState::new(Arc::new(contract))))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn record(id: &str, condition: &str) -> Value {
    json!({
        "id": id,
        "displayName": format!("Subject {id}"),
        "condition": condition,
        "diagnosisId": "DIAG-1",
        "statusId": "ACTIVE",
        "keyId": "custodian",
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let (_dir, router) = test_router();

    let (status, body) = send(&router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
}

#[tokio::test]
async fn record_create_get_update() {
    let (_dir, router) = test_router();

    let (status, body) = send(&router, "POST", "/records", Some(record("PATIENT1", "10"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "PATIENT1" }));

    let (status, body) = send(&router, "GET", "/records/PATIENT1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["displayName"], "Subject PATIENT1");
    assert_eq!(body["condition"], "10");

    let update = json!({
        "displayName": "Ada",
        "condition": "77",
        "diagnosisId": "DIAG-2",
        "statusId": "DISCHARGED",
        "keyId": "custodian-b",
    });
    let (status, body) = send(&router, "PUT", "/records/PATIENT1", Some(update)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, body) = send(&router, "GET", "/records/PATIENT1", None).await;
    assert_eq!(body["id"], "PATIENT1");
    assert_eq!(body["condition"], "77");
    assert_eq!(body["statusId"], "DISCHARGED");
    assert_eq!(body["keyId"], "custodian-b");
}

#[tokio::test]
async fn missing_record_is_404_with_error_body() {
    let (_dir, router) = test_router();

    let (status, body) = send(&router, "GET", "/records/PATIENT9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "PATIENT9 does not exist");

    let update = json!({
        "displayName": "Bob",
        "condition": "1",
        "diagnosisId": "D",
        "statusId": "S",
        "keyId": "k",
    });
    let (status, _) = send(&router, "PUT", "/records/PATIENT9", Some(update)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_records_honours_query_bounds() {
    let (_dir, router) = test_router();
    for id in ["c", "a", "b"] {
        send(&router, "POST", "/records", Some(record(id, "1"))).await;
    }

    let (status, body) = send(&router, "GET", "/records?first=a&last=c", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);

    let (_, body) = send(&router, "GET", "/records?first=&last=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&router, "GET", "/records", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&router, "GET", "/records?first=c&last=a", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn proposal_then_result() {
    let (_dir, router) = test_router();
    send(&router, "POST", "/records", Some(record("s1", "10"))).await;
    send(&router, "POST", "/records", Some(record("s2", "20"))).await;

    let proposal = json!({
        "id": "P9",
        "requesterId": "lab",
        "requestedId": "hospital",
        "subjectIds": "s1,s2",
        "keyId": "custodian",
        "modulus": "101",
    });
    let (status, body) = send(&router, "POST", "/proposals", Some(proposal)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "P9");

    // (10 + 20) * 2^-1 mod 101
    let (status, body) = send(&router, "GET", "/proposals/P9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "15");
    assert_eq!(body["subjectIds"], json!(["s1", "s2"]));

    let request = json!({
        "proposalId": "P9",
        "firstToken": "3",
        "secondToken": "1",
        "keyId": "lab-key",
        "modulus": "101",
    });
    let (status, body) = send(&router, "POST", "/results", Some(request)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "RESULT9");

    // 15 * 3 * 1^-1 mod 101
    let (status, body) = send(&router, "GET", "/results/RESULT9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "45");
    assert_eq!(body["proposalId"], "P9");
    assert_eq!(body["keyId"], "lab-key");
}

#[tokio::test]
async fn proposal_errors_map_to_status() {
    let (_dir, router) = test_router();
    send(&router, "POST", "/records", Some(record("s1", "10"))).await;

    let proposal = |subjects: &str, modulus: &str| {
        json!({
            "id": "P1",
            "requesterId": "lab",
            "requestedId": "hospital",
            "subjectIds": subjects,
            "keyId": "k",
            "modulus": modulus,
        })
    };

    let (status, body) = send(&router, "POST", "/proposals", Some(proposal("", "101"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");

    let (status, body) = send(&router, "POST", "/proposals", Some(proposal("s1,s2", "101"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "s2 does not exist");

    let (status, body) = send(&router, "POST", "/proposals", Some(proposal("s1", "abc"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "oracle");

    let (status, _) = send(&router, "GET", "/proposals/P1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
