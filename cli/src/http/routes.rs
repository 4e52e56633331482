//! HTTP路由handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use stepify_core::api::{ai_stepify, rule_stepify, StepifyOutcome};

use crate::http::{models::*, state::AppState};

/// 创建所有路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ai_stepify", post(ai_stepify_handler))
        .route("/stepify", post(stepify_handler))
        .with_state(state)
}

fn parse_body(
    payload: Result<Json<StepifyRequest>, JsonRejection>,
) -> Result<StepifyRequest, HttpServerError> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| HttpServerError::InvalidRequest(rejection.body_text()))
}

/// POST /ai_stepify - 使用模型提取微任务
async fn ai_stepify_handler(
    State(state): State<AppState>,
    payload: Result<Json<StepifyRequest>, JsonRejection>,
) -> Result<Json<StepifyOutcome>, HttpServerError> {
    let req = parse_body(payload)?;
    let params = state.ctx.generation_params();

    match ai_stepify(state.ctx.model(), req.text.as_deref(), &params).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            let err = HttpServerError::from(e);
            if let HttpServerError::Generation(msg) = &err {
                tracing::error!(error = %msg, "generation failed");
            }
            Err(err)
        }
    }
}

/// POST /stepify - 基于关键词规则提取微任务（不需要模型）
async fn stepify_handler(
    payload: Result<Json<StepifyRequest>, JsonRejection>,
) -> Result<Json<RuleStepifyResponse>, HttpServerError> {
    let req = parse_body(payload)?;
    let tasks = rule_stepify(req.text.as_deref())?;
    Ok(Json(RuleStepifyResponse { tasks }))
}
