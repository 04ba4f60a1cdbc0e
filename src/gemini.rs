use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, error};

use crate::config::GeminiConfig;
use crate::render::{RenderError, TextToImage};
use crate::util::truncate_for_log;

pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("parse error: {0}")] Parse(String),
    #[error("no image data in response")] NoImage,
    #[error("invalid base64 image data: {0}")] Base64(#[from] base64::DecodeError),
}

impl From<GeminiError> for RenderError {
    fn from(err: GeminiError) -> Self { RenderError::Provider(err.to_string()) }
}

// Shortens inline base64 payloads so responses stay readable in logs.
fn truncate_base64_in_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "data" {
                    if let serde_json::Value::String(s) = val {
                        if s.len() > 100 && s.is_ascii() {
                            *val = serde_json::Value::String(format!("{}...[truncated {} chars]", &s[..50], s.len() - 50));
                        }
                    }
                } else {
                    truncate_base64_in_json(val);
                }
            }
        }
        serde_json::Value::Array(arr) => arr.iter_mut().for_each(truncate_base64_in_json),
        _ => {}
    }
}

pub struct GeminiImageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiImageClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeminiError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn perform_api_call(&self, prompt: &str) -> Result<Vec<u8>, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, IMAGE_MODEL);
        info!("🔗 Making request to: {}", url);

        let request_body = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
                "temperature": 0.4,
                "topP": 0.95,
                "topK": 64,
                "candidateCount": 1
            }
        });

        let response = self.client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ API Error response: {}", truncate_for_log(&error_body, 2000));
            return Err(GeminiError::Http(format!("status={} body={}", status, error_body)));
        }

        let response_text = response.text().await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let parsed: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| GeminiError::Parse(format!("{}: {}", e, truncate_for_log(&response_text, 500))))?;

        if let Ok(mut logged) = serde_json::from_str::<serde_json::Value>(&response_text) {
            truncate_base64_in_json(&mut logged);
            info!("📥 Raw Gemini API response: {}", truncate_for_log(&logged.to_string(), 1000));
        }

        let image_data = extract_first_image_b64(&parsed).ok_or(GeminiError::NoImage)?;
        Ok(base64::engine::general_purpose::STANDARD.decode(image_data)?)
    }
}

#[async_trait]
impl TextToImage for GeminiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, RenderError> {
        info!("Generating image with Gemini API...");
        let bytes = self.perform_api_call(prompt).await?;
        info!("✅ Received {} image bytes", bytes.len());
        Ok(bytes)
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData
    },
    Text { #[allow(dead_code)] text: String },
    Other(#[allow(dead_code)] serde_json::Value)
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

fn extract_first_image_b64(resp: &GeminiResponse) -> Option<&str> {
    for c in &resp.candidates {
        for p in &c.content.parts {
            if let Part::Inline { inline_data } = p {
                info!("🎯 Found image data with mime type: {}", inline_data.mime_type);
                return Some(inline_data.data.as_str());
            }
        }
    }
    info!("⚠️ No inline image data found in response structure");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(base_url: String) -> GeminiImageClient {
        GeminiImageClient::new(&GeminiConfig { api_key: "gk".into(), base_url, timeout_secs: 5 }).unwrap()
    }

    fn path() -> String { format!("/models/{IMAGE_MODEL}:generateContent") }

    #[tokio::test]
    async fn decodes_first_inline_image() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"png-bytes");
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", path().as_str())
            .match_query(Matcher::UrlEncoded("key".into(), "gk".into()))
            .match_body(Matcher::PartialJson(json!({"contents": [{"parts": [{"text": "a red coat"}]}]})))
            .with_status(200)
            .with_body(json!({
                "candidates": [{"content": {"parts": [
                    {"text": "Here is your image"},
                    {"inlineData": {"mimeType": "image/png", "data": payload}}
                ]}}]
            }).to_string())
            .create_async()
            .await;

        let bytes = client(server.url()).generate_image("a red coat").await.unwrap();
        mock.assert_async().await;
        assert_eq!(bytes, b"png-bytes");
    }

    #[tokio::test]
    async fn text_only_response_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", path().as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#)
            .create_async()
            .await;

        let err = client(server.url()).generate_image("x").await.unwrap_err();
        assert!(err.to_string().contains("no image data"));
    }

    #[tokio::test]
    async fn http_failure_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", path().as_str())
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let err = client(server.url()).generate_image("x").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn long_base64_is_truncated_for_logs() {
        let mut value = json!({"parts": [{"inlineData": {"data": "A".repeat(300), "mimeType": "image/png"}}]});
        truncate_base64_in_json(&mut value);
        let data = value["parts"][0]["inlineData"]["data"].as_str().unwrap();
        assert!(data.ends_with("[truncated 250 chars]"));
        assert_eq!(value["parts"][0]["inlineData"]["mimeType"], "image/png");
    }
}
