//! JSON-over-HTTP plumbing shared by the remote generation backends.
//!
//! Errors are typed so the 500 `generation error: ...` detail says which side
//! failed: the network, the backend's status, or the shape of its reply.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const BODY_PREVIEW_CHARS: usize = 200;

/// A remote backend call that did not produce usable JSON.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend timed out at {url}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend unreachable at {url}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend answered {status} at {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
    #[error("backend reply from {url} is not JSON: {body}")]
    NotJson {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("backend reply has no `{0}` field")]
    MissingField(&'static str),
}

impl BackendError {
    fn transport(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            Self::Timeout { url, source }
        } else {
            Self::Unreachable { url, source }
        }
    }
}

/// Error bodies can be whole HTML pages; keep the detail readable.
fn body_preview(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "<empty>".to_string();
    }
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Read a string field out of a backend reply.
pub fn text_field(reply: &Value, field: &'static str) -> Result<String, BackendError> {
    reply
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(BackendError::MissingField(field))
}

/// JSON client bound to one backend base URL.
#[derive(Clone)]
pub struct JsonHttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl JsonHttpClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, url: &str) -> Result<Value, BackendError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::transport(url, e))?;
        read_json(url, resp).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<Value, BackendError> {
        let resp = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| BackendError::transport(url, e))?;
        read_json(url, resp).await
    }
}

async fn read_json(url: &str, resp: reqwest::Response) -> Result<Value, BackendError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| BackendError::transport(url, e))?;

    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body: body_preview(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| BackendError::NotJson {
        url: url.to_string(),
        body: body_preview(&body),
        source,
    })
}
