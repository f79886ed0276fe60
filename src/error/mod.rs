use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The target site answered with a non-success status.
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The target site could not be reached or its body could not be read.
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            AppError::Upstream { status, message } => {
                // Statuses that are not valid HTTP error codes (e.g. a 3xx left
                // over after redirect limits) surface as 502.
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, json!({ "message": message }))
            }
            AppError::Fetch(detail) => {
                tracing::warn!(error = %detail, "Upstream fetch failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "message": "Failed to fetch URL", "error": detail }),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Failed to analyze URL", "error": detail }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_returns_400() {
        let response = AppError::Validation("Invalid URL format".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["message"], "Invalid URL format");
    }

    #[tokio::test]
    async fn upstream_error_keeps_upstream_status() {
        let response = AppError::Upstream {
            status: 404,
            message: "Failed to fetch URL: Not Found".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["message"], "Failed to fetch URL: Not Found");
    }

    #[tokio::test]
    async fn upstream_error_with_redirect_status_returns_502() {
        let response = AppError::Upstream {
            status: 302,
            message: "Failed to fetch URL: Found".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn fetch_error_returns_502_with_detail() {
        let response = AppError::Fetch("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["message"], "Failed to fetch URL");
        assert_eq!(json["error"], "connection refused");
    }

    #[tokio::test]
    async fn internal_error_returns_500_with_generic_message() {
        let response = AppError::Internal("task panicked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["message"], "Failed to analyze URL");
        assert_eq!(json["error"], "task panicked");
    }
}
