//! Generates outfits for a sample event and renders each one to a PNG under
//! `./generation`. Needs both `MISTRAL_API_KEY` and `GEMINI_API_KEY`.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use cloudcloset::{
    config::{Config, GeminiConfig},
    gemini::GeminiImageClient,
    generator::OutfitGenerator,
    mistral::MistralClient,
    models::{EventDetails, GeneratedImageResult},
    render::{render_outfit_images, GENERATION_DIR},
};

fn sample_event() -> EventDetails {
    EventDetails {
        date: Some("2025-10-10".into()),
        event_type: Some("wedding".into()),
        gender: Some("female".into()),
        weather: Some("cool, windy evening, 18°C".into()),
        location: Some("London, outdoor venue".into()),
        time: Some("evening".into()),
        occasion: Some("semi-formal business gala".into()),
        vibe: Some("professional, elegant".into()),
        dress_code: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env().context("failed to load configuration")?;
    let gemini_config = GeminiConfig::from_env().context("failed to load Gemini configuration")?;

    let chat = MistralClient::new(&config.mistral).context("failed to build Mistral client")?;
    let generator = OutfitGenerator::new(Arc::new(chat));
    let outfits = generator.generate(&sample_event()).await.context("outfit generation failed")?;

    let images = GeminiImageClient::new(&gemini_config).context("failed to build Gemini client")?;
    let out_dir = std::env::current_dir()?.join(GENERATION_DIR);
    let results = render_outfit_images(&images, &outfits.descriptions(), &out_dir).await?;

    for (idx, result) in results.iter().enumerate() {
        tracing::info!("Outfit {}: {}", idx + 1, result.description());
        match result {
            GeneratedImageResult::Rendered { image_path, .. } => {
                println!("Outfit {} image saved at: {}", idx + 1, image_path.display())
            }
            GeneratedImageResult::Failed { error, .. } => println!("Outfit {} error: {}", idx + 1, error),
        }
    }
    Ok(())
}
