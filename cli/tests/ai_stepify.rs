use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use stepify_cli::http::{build_app, AppState};
use stepify_core::api::{
    AppConfig, AppContext, GenerationParams, ModelConfig, ModelLoad, TextGenerator,
};

struct FixedGenerator(&'static str);

#[async_trait]
impl TextGenerator for FixedGenerator {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("index out of range"))
    }
}

fn app_with(model: ModelLoad) -> Router {
    build_app(AppState::new(AppContext::with_model(AppConfig::default(), model)))
}

fn ready(generator: impl TextGenerator + 'static) -> Router {
    app_with(ModelLoad::Ready(Arc::new(generator)))
}

fn degraded() -> Router {
    app_with(ModelLoad::unavailable(&ModelConfig::default(), "weights not found"))
}

async fn post(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn blank_text_is_400_regardless_of_model() {
    for body in [r#"{"text":""}"#, r#"{"text":"  \n\t "}"#, r#"{}"#] {
        for app in [degraded(), ready(FixedGenerator("[]"))] {
            let (status, json) = post(app, "/ai_stepify", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, json!({"detail": "no input text"}));
        }
    }
}

#[tokio::test]
async fn unavailable_model_is_503() {
    let (status, json) = post(degraded(), "/ai_stepify", r#"{"text":"restock water"}"#).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json, json!({"detail": "AI model not available"}));
}

#[tokio::test]
async fn mocked_model_tasks_are_preserved() {
    let reply = r#"[{"title":"Check smoke alarms","description":"Verify function","type":"safety","priority":"high","estimatedMinutes":5}]"#;
    let (status, json) = post(
        ready(FixedGenerator(reply)),
        "/ai_stepify",
        r#"{"text":"Check smoke alarms and restock water."}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"tasks": [{
            "title": "Check smoke alarms",
            "description": "Verify function",
            "type": "safety",
            "priority": "high",
            "estimatedMinutes": 5
        }]})
    );
}

#[tokio::test]
async fn non_conforming_tasks_are_not_coerced() {
    let reply = r#"Tasks: [{"title":"Cook","type":"cooking","estimatedMinutes":"ten"}] end"#;
    let (status, json) = post(ready(FixedGenerator(reply)), "/ai_stepify", r#"{"text":"x"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"tasks": [{"title": "Cook", "type": "cooking", "estimatedMinutes": "ten"}]})
    );
}

#[tokio::test]
async fn unparseable_output_returns_raw() {
    let reply = "check smoke alarms, restock water";
    let (status, json) = post(ready(FixedGenerator(reply)), "/ai_stepify", r#"{"text":"x"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"raw": "check smoke alarms, restock water"}));
}

#[tokio::test]
async fn null_output_returns_raw() {
    let (status, json) = post(ready(FixedGenerator("null")), "/ai_stepify", r#"{"text":"x"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"raw": "null"}));
}

#[tokio::test]
async fn generation_failure_is_500_with_message() {
    let (status, json) = post(ready(FailingGenerator), "/ai_stepify", r#"{"text":"x"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"detail": "generation error: index out of range"}));
}

#[tokio::test]
async fn malformed_body_is_400() {
    let (status, json) = post(degraded(), "/ai_stepify", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn rule_stepify_works_without_model() {
    let (status, json) = post(
        degraded(),
        "/stepify",
        r#"{"text":"写真を撮る。来場者を誘導する。忘れ物を数える。怪我人がいる。"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tasks = json["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[3]["type"], "safety");
    assert_eq!(tasks[3]["priority"], "high");
    assert_eq!(tasks[3]["estimatedMinutes"], 5);
    assert_eq!(tasks[3]["status"], "open");
    assert_eq!(tasks[0]["id"], "t1");
}

#[tokio::test]
async fn rule_stepify_blank_text_is_400() {
    let (status, json) = post(degraded(), "/stepify", r#"{"text":" "}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"detail": "no input text"}));
}
