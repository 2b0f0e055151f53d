//! HTTP-facing errors
use crate::upstream::UpstreamError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tripplan_core::DecodeError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing or invalid 'prompt' in request body.")]
    MissingPrompt,

    #[error("Method not allowed (GET or POST only)")]
    MethodNotAllowed,

    #[error("OPENAI_API_KEY is not configured in environment.")]
    MissingApiKey,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPrompt => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Decode(err) => return (status, Json(err)).into_response(),
            ApiError::Upstream(UpstreamError::Status { status, body }) => json!({
                "error": "upstream_status",
                "status": status.as_u16(),
                "detail": body,
            }),
            ApiError::Upstream(UpstreamError::Transport(detail)) => json!({
                "error": "upstream_unreachable",
                "detail": detail,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
