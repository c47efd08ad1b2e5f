use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use reply_classifier::Prediction;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    pub label: String,
    pub confidence: f32,
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Predicted label with calibrated confidence", body = PredictResponse),
        (status = 400, description = "Missing, non-string, or empty text"),
        (status = 500, description = "Inference failed")
    )
)]
#[tracing::instrument(name = "POST /predict", skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    // Deserialization failures (missing field, non-string text, bad JSON)
    // are client errors, not unprocessable-entity responses.
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("'text' must be a non-empty string"));
    }

    let Prediction { label, confidence } = state.classifier.classify(text).await?;

    Ok(Json(PredictResponse { label, confidence }))
}
