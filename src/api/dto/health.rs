//! DTOs for health check and circuit endpoints.

use serde::Serialize;

use crate::domain::blog_parser::SourceHealth;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: CheckStatus,
    pub source_circuit: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Circuit breaker state after an administrative reset.
#[derive(Debug, Serialize)]
pub struct CircuitResponse {
    pub success: bool,
    pub circuit: SourceHealth,
}
