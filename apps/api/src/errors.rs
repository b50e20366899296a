use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

pub const UPSTREAM_FAILURE_MESSAGE: &str = "AI 服务调用失败，请稍后再试。";
pub const TIMEOUT_MESSAGE: &str = "AI 响应超时，请稍后重试。";
pub const INTERNAL_MESSAGE: &str = "服务异常，请稍后重试。";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The body is always `{ "error": <user-facing message> }`, with an extra
/// `details` field carrying the raw upstream body for `Upstream`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error (status {status})")]
    Upstream { status: u16, details: String },

    #[error("Upstream timed out")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, body } => AppError::Upstream {
                status,
                details: body,
            },
            LlmError::Timeout(_) => AppError::Timeout,
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Upstream { status, details } => {
                tracing::error!("LLM API returned {status}: {details}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": UPSTREAM_FAILURE_MESSAGE, "details": details }),
                )
            }
            AppError::Timeout => {
                tracing::warn!("LLM call timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    json!({ "error": TIMEOUT_MESSAGE }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": INTERNAL_MESSAGE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_message() {
        let response = AppError::Validation("内容不能为空。".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "内容不能为空。");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_upstream_maps_to_502_with_details() {
        let response = AppError::from(LlmError::Api {
            status: 401,
            body: "{\"error\":\"bad key\"}".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"], UPSTREAM_FAILURE_MESSAGE);
        assert_eq!(json["details"], "{\"error\":\"bad key\"}");
    }

    #[tokio::test]
    async fn test_internal_hides_cause() {
        let response = AppError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], INTERNAL_MESSAGE);
    }
}
