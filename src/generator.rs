use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::mistral::{ChatCompletion, ChatError, ChatRequest};
use crate::models::{EventDetails, OutfitResponse};
use crate::prompt::build_messages;
use crate::util::truncate_for_log;

pub const MODEL: &str = "mistral-large-latest";
pub const MAX_TOKENS: u32 = 1500;
pub const TEMPERATURE: f32 = 0.5;
pub const EXPECTED_OUTFITS: usize = 3;

/// Everything that can go wrong between sending the prompt and holding a
/// typed [`OutfitResponse`].
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Mistral API call failed: {0}")]
    Provider(#[from] ChatError),
    #[error("Mistral API returned an empty response")]
    EmptyResponse,
    #[error("Response is not valid JSON: {preview}...")]
    MalformedOutput { preview: String },
    #[error("Failed to parse Mistral API JSON output: {message}\nRaw response: {raw}")]
    Parse { message: String, raw: String },
    #[error("Model output does not match the outfit schema: {0}")]
    SchemaMismatch(String),
}

/// Removes a surrounding ```json / ``` fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```json").or_else(|| trimmed.strip_prefix("```")) else {
        return trimmed;
    };
    let inner = inner.trim();
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Turns event details into outfit suggestions via an injected chat model.
pub struct OutfitGenerator {
    chat: Arc<dyn ChatCompletion>,
}

impl OutfitGenerator {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self { Self { chat } }

    pub fn request_for(details: &EventDetails) -> ChatRequest {
        ChatRequest {
            model: MODEL.to_string(),
            messages: build_messages(details),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// Calls the model and parses its answer as JSON, without checking shape.
    pub async fn generate_raw(&self, details: &EventDetails) -> Result<Value, GenerationError> {
        let request = Self::request_for(details);
        let response = self.chat.complete(&request).await?;

        let output_text = response.first_content().unwrap_or_default();
        info!("📥 Raw model response ({} chars): {}", output_text.len(), truncate_for_log(output_text, 1000));
        if output_text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        let cleaned = strip_code_fences(output_text);
        if !cleaned.starts_with('{') {
            return Err(GenerationError::MalformedOutput { preview: cleaned.chars().take(50).collect() });
        }

        serde_json::from_str(cleaned).map_err(|e| GenerationError::Parse {
            message: e.to_string(),
            raw: output_text.to_string(),
        })
    }

    /// [`generate_raw`](Self::generate_raw) followed by binding into the outfit schema.
    pub async fn generate(&self, details: &EventDetails) -> Result<OutfitResponse, GenerationError> {
        let value = self.generate_raw(details).await?;
        let response = bind_response(value)?;
        if response.outfits.len() != EXPECTED_OUTFITS {
            warn!("⚠️ Model returned {} outfits, expected {}", response.outfits.len(), EXPECTED_OUTFITS);
        }
        Ok(response)
    }
}

pub fn bind_response(value: Value) -> Result<OutfitResponse, GenerationError> {
    serde_json::from_value(value).map_err(|e| GenerationError::SchemaMismatch(e.to_string()))
}
