use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reply Classifier API",
        version = "1.0.0",
        description = "Sentiment classification for inbound replies, with temperature-calibrated confidence scores."
    ),
    tags(
        (name = "health", description = "Service status"),
        (name = "predict", description = "Sentiment inference")
    ),
    paths(crate::routes::health::health, crate::routes::predict::predict),
    components(schemas(
        crate::routes::health::HealthResponse,
        crate::routes::predict::PredictRequest,
        crate::routes::predict::PredictResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
