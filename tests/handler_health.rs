mod common;

use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

use common::{StubParser, create_test_server, sample_articles};

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = create_test_server(Arc::new(StubParser::returning(sample_articles())));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["source_circuit"]["status"], "ok");
    assert_eq!(
        json["checks"]["source_circuit"]["message"],
        "CLOSED, failures: 0/5"
    );
}

#[tokio::test]
async fn test_health_degraded_when_circuit_open() {
    let server = create_test_server(Arc::new(StubParser::unavailable()));

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["source_circuit"]["status"], "error");
    assert_eq!(
        json["checks"]["source_circuit"]["message"],
        "OPEN, failures: 5/5"
    );
}

#[tokio::test]
async fn test_health_recovers_after_circuit_reset() {
    let server = create_test_server(Arc::new(StubParser::unavailable()));

    server
        .get("/health")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    server.post("/api/circuit/reset").await.assert_status_ok();

    server.get("/health").await.assert_status_ok();
}
