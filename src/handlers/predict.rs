//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub probability: f64,
    pub prediction: u8,
}

/// Score a single feature record.
///
/// The artifact is lazily loaded on the first request and cached for the
/// process lifetime. An empty or unparseable body is rejected before the
/// model is touched.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(value) =
        payload.map_err(|_| AppError::BadRequest("No input data provided".to_string()))?;

    if is_empty_payload(&value) {
        return Err(AppError::BadRequest("No input data provided".to_string()));
    }

    let record = match value {
        Value::Object(map) => map,
        other => {
            return Err(AppError::Prediction(format!(
                "expected a JSON object of features, got {}",
                json_type(&other)
            )))
        }
    };

    let artifact = state.registry.get_or_load(&state.config.model_path)?;
    let result = artifact.predict(&record);

    Ok(Json(PredictResponse {
        probability: round4(result.probability),
        prediction: result.prediction,
    }))
}

/// Mirrors the falsy-body check of the original service: null, false, zero,
/// empty string/array/object all count as "no input".
fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn round4(p: f64) -> f64 {
    (p * 10_000.0).round() / 10_000.0
}
