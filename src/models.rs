use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::prompt::NO_PREFERENCE;

/// Event context supplied by the client. Every field is optional; a missing
/// value means the user has no preference for it.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct EventDetails {
    #[serde(default)]
    pub date: Option<String>, // ISO format preferred
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub dress_code: Option<String>,
}

/// `EventDetails` with every gap filled by [`NO_PREFERENCE`]. Field order is
/// the order the model sees them in.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct OutfitRequestContext {
    pub date: String,
    pub event_type: String,
    pub gender: String,
    pub weather: String,
    pub location: String,
    pub time: String,
    pub occasion: String,
    pub vibe: String,
    pub dress_code: String,
}

fn or_no_preference(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NO_PREFERENCE.to_string(),
    }
}

impl From<&EventDetails> for OutfitRequestContext {
    fn from(details: &EventDetails) -> Self {
        Self {
            date: or_no_preference(&details.date),
            event_type: or_no_preference(&details.event_type),
            gender: or_no_preference(&details.gender),
            weather: or_no_preference(&details.weather),
            location: or_no_preference(&details.location),
            time: or_no_preference(&details.time),
            occasion: or_no_preference(&details.occasion),
            vibe: or_no_preference(&details.vibe),
            dress_code: or_no_preference(&details.dress_code),
        }
    }
}

impl From<OutfitRequestContext> for EventDetails {
    fn from(ctx: OutfitRequestContext) -> Self {
        Self {
            date: Some(ctx.date),
            event_type: Some(ctx.event_type),
            gender: Some(ctx.gender),
            weather: Some(ctx.weather),
            location: Some(ctx.location),
            time: Some(ctx.time),
            occasion: Some(ctx.occasion),
            vibe: Some(ctx.vibe),
            dress_code: Some(ctx.dress_code),
        }
    }
}

/// One recommended look. Model output is not fully trusted, so nothing here
/// is required.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Outfit {
    #[serde(default)]
    pub outfit_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub clothing_items: Option<Vec<String>>,
    #[serde(default)]
    pub accessories: Option<Vec<String>>,
    #[serde(default)]
    pub weather_considerations: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct OutfitResponse {
    #[serde(default)]
    pub outfits: Vec<Outfit>,
}

impl OutfitResponse {
    /// Descriptions in model order, skipping outfits without one.
    pub fn descriptions(&self) -> Vec<String> {
        self.outfits.iter().filter_map(|o| o.description.clone()).collect()
    }
}

/// Outcome of rendering a single outfit description to an image file.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum GeneratedImageResult {
    Rendered { description: String, image_path: PathBuf },
    Failed { description: String, error: String },
}

impl GeneratedImageResult {
    pub fn description(&self) -> &str {
        match self {
            Self::Rendered { description, .. } | Self::Failed { description, .. } => description,
        }
    }
}
