//! API Handlers
use crate::error::ApiError;
use crate::metrics::{OUTCOME_OK, OUTCOME_UPSTREAM};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use tripplan_core::{decode, SuggestionSet};
use tripplan_prompt::{build_chat_request, clean_prompt, PromptMode};
use uuid::Uuid;

pub const GENERATE_PATH: &str = "/api/generate-itinerary";

/// Liveness probe. Reports configuration presence, never values.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "method": "GET",
            "path": GENERATE_PATH,
            "hasOpenAIKey": state.config.has_api_key(),
            "hasFallbackPrompt": state.config.fallback_prompt.is_some(),
            "model": state.config.model,
            "version": env!("CARGO_PKG_VERSION"),
            "note": "tripplan generate-itinerary health-check",
        })),
    )
}

/// Generation path: `{ prompt, mode? }` in, `{ suggestions }` out.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuggestionSet>, ApiError> {
    let trace_id = Uuid::new_v4().to_string();
    let config = &state.config;
    let api_key = config.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;

    // Unparsable bodies are treated like an empty object
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let prompt = payload
        .get("prompt")
        .and_then(Value::as_str)
        .and_then(|p| clean_prompt(p, config.max_prompt_chars))
        .or_else(|| {
            config
                .fallback_prompt
                .as_deref()
                .and_then(|p| clean_prompt(p, config.max_prompt_chars))
        })
        .ok_or(ApiError::MissingPrompt)?;
    let mode = PromptMode::from_request(payload.get("mode").and_then(Value::as_str));

    let request = build_chat_request(&prompt, mode, &config.chat_options());
    info!(
        target: "tripplan::generate",
        trace_id = %trace_id,
        mode = mode.as_str(),
        prompt_chars = prompt.chars().count(),
        model = %request.model,
        "calling upstream model"
    );

    let raw = match state.upstream.complete(api_key, &request, &trace_id).await {
        Ok(raw) => raw,
        Err(err) => {
            warn!(target: "tripplan::generate", trace_id = %trace_id, error = %err, "upstream call failed");
            state.metrics.record(OUTCOME_UPSTREAM);
            return Err(err.into());
        }
    };

    match decode(&raw) {
        Ok(set) => {
            info!(
                target: "tripplan::generate",
                trace_id = %trace_id,
                suggestions = set.len(),
                "itinerary generated"
            );
            state.metrics.record(OUTCOME_OK);
            Ok(Json(set))
        }
        Err(err) => {
            warn!(
                target: "tripplan::generate",
                trace_id = %trace_id,
                kind = err.kind.code(),
                stage = %err.kind.stage(),
                detail = %err.detail,
                "could not decode model output"
            );
            state.metrics.record(err.kind.code());
            Err(err.into())
        }
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
