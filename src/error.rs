use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// An upstream rejected our credential. Never echoed to clients.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Upstream API error: {message}")]
    UpstreamApi {
        message: String,
        status_code: Option<u16>,
    },

    #[error("LLM API error: {message}")]
    LlmApi {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(message: impl Into<String>, status_code: Option<u16>) -> Self {
        AppError::UpstreamApi {
            message: message.into(),
            status_code,
        }
    }

    pub fn llm(message: impl Into<String>, status_code: Option<u16>) -> Self {
        AppError::LlmApi {
            message: message.into(),
            status_code,
        }
    }

    /// Status reported by the upstream service, when the error came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AppError::UpstreamApi { status_code, .. } | AppError::LlmApi { status_code, .. } => {
                *status_code
            }
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: &str, detail: Option<String>) -> Self {
        Self {
            error: error.to_string(),
            detail,
            status_code: status.as_u16(),
        }
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            None,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::RateLimit(msg) => {
                tracing::error!("Rate limit error: {}", msg);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorResponse::new(
                        StatusCode::TOO_MANY_REQUESTS,
                        "Rate limit exceeded",
                        Some(msg.clone()),
                    ),
                )
            }
            AppError::Authentication(msg) => {
                tracing::error!("Authentication error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Service configuration error",
                        None,
                    ),
                )
            }
            AppError::UpstreamApi { message, status_code }
            | AppError::LlmApi { message, status_code } => {
                tracing::error!("{} (upstream status: {:?})", self, status_code);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "External API error",
                        Some(format!("External API error: {}", message)),
                    ),
                )
            }
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Validation error",
                    Some(msg.clone()),
                ),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Unexpected error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal())
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_429() {
        let (status, body) = render(AppError::RateLimit("slow down".into())).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["status_code"], 429);
        assert_eq!(body["detail"], "slow down");
    }

    #[tokio::test]
    async fn test_authentication_hides_cause() {
        let (status, body) =
            render(AppError::Authentication("Invalid Groq API key sk-123".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Service configuration error");
        assert!(body.get("detail").is_none());
        assert!(!body.to_string().contains("sk-123"));
    }

    #[tokio::test]
    async fn test_upstream_error_is_descriptive() {
        let (status, body) = render(AppError::upstream(
            "Google Places API error: quota project missing",
            Some(400),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "External API error");
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("quota project missing"));
    }

    #[tokio::test]
    async fn test_internal_error_is_generic() {
        let (status, body) = render(AppError::Internal("null pointer in handler".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_validation_maps_to_422() {
        let (status, body) = render(AppError::Validation("what: too short".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status_code"], 422);
    }

    #[test]
    fn test_upstream_status_only_for_upstream_variants() {
        assert_eq!(AppError::llm("boom", Some(503)).upstream_status(), Some(503));
        assert_eq!(AppError::upstream("timeout", None).upstream_status(), None);
        assert_eq!(AppError::RateLimit("x".into()).upstream_status(), None);
    }
}
