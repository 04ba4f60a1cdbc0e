use crate::mistral::ChatMessage;
use crate::models::{EventDetails, OutfitRequestContext};

/// Stand-in for any event detail the client left out.
pub const NO_PREFERENCE: &str = "no preference";

pub const SYSTEM_PROMPT: &str = concat!(
    "You are a fashion stylist AI assistant. Generate exactly 3 distinct outfit combinations in valid JSON format, strictly tailored to ALL provided details. ",
    "Consider: date, event type, gender, location, weather, time of day, occasion, vibe and dress code. ",
    "Each outfit must include: an 'outfit_id' (integer: 1, 2, or 3), a 'description' (string), 'clothing_items' (list of strings), 'accessories' (list of strings), and 'weather_considerations' (string). ",
    "Return only valid JSON, enclosed in curly braces {}, with no extra text, code blocks (e.g., ```json), or incomplete structures. ",
    "When a field shows 'no preference', use your best judgment for that category based on other provided details. ",
    "Example format: ",
    "{\"outfits\": [",
    "{\"outfit_id\": 1, \"description\": \"A cozy look\", \"clothing_items\": [\"sweater\", \"jeans\"], \"accessories\": [\"earrings\", \"boots\"], \"weather_considerations\": \"Scarf for warmth\"},",
    "{\"outfit_id\": 2, \"description\": \"A trendy outfit\", \"clothing_items\": [\"dress\", \"tights\"], \"accessories\": [\"necklace\", \"loafers\"], \"weather_considerations\": \"Coat for cool weather\"},",
    "{\"outfit_id\": 3, \"description\": \"A modern vibe\", \"clothing_items\": [\"blazer\", \"trousers\"], \"accessories\": [\"flats\", \"tote\"], \"weather_considerations\": \"Cardigan for layering\"}",
    "]}"
);

/// Pretty-printed, field-ordered JSON of the cleaned details.
pub fn context_text(details: &EventDetails) -> String {
    let ctx = OutfitRequestContext::from(details);
    // A struct of plain strings always serializes.
    serde_json::to_string_pretty(&ctx).unwrap_or_default()
}

pub fn build_messages(details: &EventDetails) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(context_text(details)),
    ]
}
