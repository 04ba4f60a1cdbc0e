use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use parking_lot::Mutex;
use tower::ServiceExt;

use cloudcloset::generator::OutfitGenerator;
use cloudcloset::mistral::{ChatCompletion, ChatCompletionResponse, ChatError, ChatRequest};
use cloudcloset::routes::AppState;

/// Chat model double that replays a fixed answer and records requests.
pub struct StubChat {
    reply: Result<String, String>,
    panics: bool,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl StubChat {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.into()), panics: false, requests: Mutex::default() })
    }

    pub fn panicking() -> Arc<Self> {
        Arc::new(Self { reply: Err("unreachable".into()), panics: true, requests: Mutex::default() })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.into()), panics: false, requests: Mutex::default() })
    }
}

#[async_trait]
impl ChatCompletion for StubChat {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletionResponse, ChatError> {
        self.requests.lock().push(request.clone());
        if self.panics {
            panic!("chat double exploded");
        }
        match &self.reply {
            Ok(text) => Ok(ChatCompletionResponse::from_text(text.clone())),
            Err(message) => Err(ChatError::Http(message.clone())),
        }
    }
}

pub fn build_test_app(chat: Arc<StubChat>) -> Router {
    cloudcloset::app(AppState::new(OutfitGenerator::new(chat)))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub const THREE_OUTFITS: &str = r#"{"outfits": [
  {"outfit_id": 1, "description": "Midi wrap dress with a tailored wool coat", "clothing_items": ["wrap dress", "wool coat"], "accessories": ["pearl earrings", "block heels"], "weather_considerations": "Coat blocks the wind"},
  {"outfit_id": 2, "description": "Silk blouse with wide-leg trousers", "clothing_items": ["silk blouse", "trousers", "cropped blazer"], "accessories": ["clutch", "loafers"], "weather_considerations": "Blazer for the evening chill"},
  {"outfit_id": 3, "description": "Long-sleeve satin gown", "clothing_items": ["satin gown", "pashmina"], "accessories": ["gold cuff", "heeled boots"], "weather_considerations": "Sleeves and pashmina for 18C"}
]}"#;
