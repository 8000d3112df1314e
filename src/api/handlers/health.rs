//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage answers and the source circuit is not open
/// - **503 Service Unavailable**: Storage failed or the source circuit is `OPEN`
///
/// # Components Checked
///
/// 1. **Storage**: Reads the stored article set
/// 2. **Source circuit**: Circuit breaker state of the blog fetcher (no network call)
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok" },
///     "source_circuit": {
///       "status": "ok",
///       "message": "CLOSED, failures: 0/5"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;
    let circuit_check = check_source_circuit(&state);

    let all_healthy = storage_check.status == "ok" && circuit_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
            source_circuit: circuit_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match state.article_service.storage_ready().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: None,
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Storage error: {}", e)),
        },
    }
}

fn check_source_circuit(state: &AppState) -> CheckStatus {
    let health = state.article_service.source_health();
    let message = Some(format!(
        "{}, failures: {}/{}",
        health.circuit_state, health.failures, health.failure_threshold
    ));

    CheckStatus {
        status: if health.is_open() { "error" } else { "ok" }.to_string(),
        message,
    }
}
