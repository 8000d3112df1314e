//! Handler for the circuit breaker override.

use axum::{Json, extract::State};

use crate::api::dto::health::CircuitResponse;
use crate::state::AppState;

/// Forces the source circuit breaker back to `CLOSED`.
///
/// # Endpoint
///
/// `POST /api/circuit/reset`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "circuit": {
///     "url": "https://is-systems.org/blog",
///     "circuit_state": "CLOSED",
///     "failures": 0,
///     "failure_threshold": 5,
///     "last_failure_at": null
///   }
/// }
/// ```
pub async fn reset_circuit_handler(State(state): State<AppState>) -> Json<CircuitResponse> {
    let circuit = state.article_service.reset_circuit();
    tracing::info!(url = %circuit.url, "Source circuit reset via API");

    Json(CircuitResponse {
        success: true,
        circuit,
    })
}
