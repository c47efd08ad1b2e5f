//! Route tests against the real router with a deterministic classifier.

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use reply_classifier::{Classifier, Prediction, pipeline};
use reply_classifier_api::{construct_router, state::State};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// Feeds fixed logits through the shared calibration path, standing in for
/// a model that always reads "I love this product" as positive.
struct FixedLogits {
    logits: Vec<f32>,
    temperature: f32,
}

#[async_trait]
impl Classifier for FixedLogits {
    async fn classify(&self, _text: &str) -> anyhow::Result<Prediction> {
        Ok(pipeline::calibrate(&self.logits, self.temperature))
    }
}

struct Failing;

#[async_trait]
impl Classifier for Failing {
    async fn classify(&self, _text: &str) -> anyhow::Result<Prediction> {
        Err(anyhow::anyhow!("session exploded"))
    }
}

fn test_router(temperature: f32) -> axum::Router {
    let classifier = Arc::new(FixedLogits {
        logits: vec![0.1, 0.2, 3.0],
        temperature,
    });
    construct_router(Arc::new(State::new(classifier, temperature)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok_and_temperature() {
    let response = test_router(1.8)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!((body["temperature"].as_f64().unwrap() - 1.8).abs() < 1e-6);
}

#[tokio::test]
async fn health_alias_route_matches_root() {
    let response = test_router(2.5)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!((body["temperature"].as_f64().unwrap() - 2.5).abs() < 1e-6);
}

#[tokio::test]
async fn predict_returns_positive_with_max_probability() {
    let response = test_router(1.0)
        .oneshot(post_json("/predict", json!({"text": "I love this product"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["label"], "positive");

    let confidence = body["confidence"].as_f64().unwrap();
    let expected = pipeline::softmax(&[0.1, 0.2, 3.0])[2] as f64;
    assert!((confidence - expected).abs() < 1e-6);
    assert!((0.0..=1.0).contains(&confidence));
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let response = test_router(1.8)
        .oneshot(post_json("/predict", json!({"text": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("non-empty")
    );
}

#[tokio::test]
async fn whitespace_only_text_is_rejected() {
    let response = test_router(1.8)
        .oneshot(post_json("/predict", json!({"text": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_text_field_is_rejected() {
    let response = test_router(1.8)
        .oneshot(post_json("/predict", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_string_text_is_rejected() {
    let response = test_router(1.8)
        .oneshot(post_json("/predict", json!({"text": 42})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn classifier_failure_maps_to_generic_internal_error() {
    let state = Arc::new(State::new(Arc::new(Failing), 1.8));
    let response = construct_router(state)
        .oneshot(post_json("/predict", json!({"text": "anything"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    // Internal details stay in the logs.
    assert!(
        !body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("exploded")
    );
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = test_router(1.8)
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/predict"].is_object());
}
