//! HTTP API数据模型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use stepify_core::api::{RuleTask, StepifyError};

// ============= Stepify =============

/// Body of both stepify endpoints. A missing or null `text` counts as empty.
#[derive(Debug, Default, Deserialize)]
pub struct StepifyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RuleStepifyResponse {
    pub tasks: Vec<RuleTask>,
}

// ============= Error Handling =============

#[derive(Debug)]
pub enum HttpServerError {
    InvalidRequest(String),
    ModelUnavailable,
    Generation(String),
}

impl From<StepifyError> for HttpServerError {
    fn from(err: StepifyError) -> Self {
        match err {
            StepifyError::EmptyInput => Self::InvalidRequest(err.to_string()),
            StepifyError::ModelUnavailable => Self::ModelUnavailable,
            StepifyError::Generation(msg) => Self::Generation(msg),
        }
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                StepifyError::ModelUnavailable.to_string(),
            ),
            Self::Generation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                StepifyError::Generation(msg).to_string(),
            ),
        };

        let body = serde_json::json!({ "detail": detail });

        (status, Json(body)).into_response()
    }
}
