//! Root and health check handlers

use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "Global Mental Health & Lifestyle Predictor";

#[derive(Serialize)]
pub struct RootResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "OK",
        service: SERVICE_NAME,
    })
}

/// Always OK, regardless of artifact state.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK" })
}
