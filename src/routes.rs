use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::{error::{ApiError, ApiResult}, generator::OutfitGenerator, models::{EventDetails, OutfitResponse}};

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<OutfitGenerator>,
}

impl AppState {
    pub fn new(generator: OutfitGenerator) -> Self {
        Self { generator: Arc::new(generator) }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", message: "CloudCloset outfit service is running." })
}

/// Reads the body as event details. All fields are optional, so `{}` is
/// accepted, but the body itself must be a non-empty JSON object.
pub fn parse_event_details(body: &[u8]) -> ApiResult<EventDetails> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty request body.".into()));
    }
    let payload: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON payload.".into()))?;
    if !payload.is_object() {
        return Err(ApiError::BadRequest("Invalid event details: expected a JSON object".into()));
    }
    serde_json::from_value(payload)
        .map_err(|e| ApiError::BadRequest(format!("Invalid event details: {e}")))
}

pub async fn generate_outfits(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<OutfitResponse>> {
    let request_id = Uuid::new_v4();
    let details = parse_event_details(&body)?;
    tracing::info!(%request_id, "🚀 Generating outfits for event: {:?}", details.event_type);

    let response = state.generator.generate(&details).await?;

    tracing::info!(%request_id, "✅ Generated {} outfits", response.outfits.len());
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bad_request(result: ApiResult<EventDetails>) -> String {
        match result {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn empty_object_is_valid() {
        assert_eq!(parse_event_details(b"{}").unwrap(), EventDetails::default());
    }

    #[test]
    fn null_fields_and_unknown_keys_are_accepted() {
        let details = parse_event_details(br#"{"vibe": null, "gender": "male", "season": "monsoon"}"#).unwrap();
        assert_eq!(details.vibe, None);
        assert_eq!(details.gender.as_deref(), Some("male"));
    }

    #[test]
    fn empty_body_is_rejected() {
        assert_eq!(bad_request(parse_event_details(b"")), "Empty request body.");
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert_eq!(bad_request(parse_event_details(b"{nope")), "Invalid JSON payload.");
        assert_eq!(bad_request(parse_event_details(b"  \n")), "Invalid JSON payload.");
    }

    #[test]
    fn wrong_field_types_are_rejected() {
        assert!(bad_request(parse_event_details(br#"{"date": 20251010}"#)).starts_with("Invalid event details"));
        assert!(bad_request(parse_event_details(b"[1, 2]")).starts_with("Invalid event details"));
        assert!(bad_request(parse_event_details(b"[]")).starts_with("Invalid event details"));
        assert!(bad_request(parse_event_details(b"null")).starts_with("Invalid event details"));
    }
}
