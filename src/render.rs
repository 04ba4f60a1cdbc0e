//! Offline rendering of outfit descriptions to PNG files.
//!
//! Not wired into the HTTP API; the `render_outfits` binary drives it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::ImageFormat;
use thiserror::Error;
use tracing::{error, info};

use crate::models::GeneratedImageResult;
use crate::util::truncate_for_log;

/// Directory, relative to the working directory, that renders land in.
pub const GENERATION_DIR: &str = "generation";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image generation failed: {0}")]
    Provider(String),
    #[error("could not decode generated image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Given a text prompt, returns an encoded raster image.
#[async_trait]
pub trait TextToImage: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, RenderError>;
}

pub fn image_prompt(description: &str) -> String {
    format!("Realistic photo of {description}, high quality, detailed, natural lighting, elegant female attire")
}

pub fn output_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("outfit_{index}.png"))
}

/// Renders each description in turn. A failure on one outfit is recorded in
/// its result and does not stop the others; only failing to create `out_dir`
/// aborts the whole run.
pub async fn render_outfit_images(
    generator: &dyn TextToImage,
    descriptions: &[String],
    out_dir: &Path,
) -> Result<Vec<GeneratedImageResult>, RenderError> {
    tokio::fs::create_dir_all(out_dir).await?;

    let mut results = Vec::with_capacity(descriptions.len());
    for (i, desc) in descriptions.iter().enumerate() {
        let index = i + 1;
        let path = output_path(out_dir, index);
        match render_one(generator, desc, &path).await {
            Ok(()) => {
                info!("🖼️ Generated Outfit {}: {}", index, truncate_for_log(desc, 50));
                results.push(GeneratedImageResult::Rendered { description: desc.clone(), image_path: path });
            }
            Err(e) => {
                error!("❌ Error generating Outfit {}: {}", index, e);
                results.push(GeneratedImageResult::Failed { description: desc.clone(), error: e.to_string() });
            }
        }
    }
    Ok(results)
}

async fn render_one(generator: &dyn TextToImage, description: &str, path: &Path) -> Result<(), RenderError> {
    let bytes = generator.generate_image(&image_prompt(description)).await?;
    let target = path.to_path_buf();
    // Re-encode so the file is PNG whatever format the model returned.
    tokio::task::spawn_blocking(move || -> Result<(), RenderError> {
        let img = image::load_from_memory(&bytes)?;
        img.save_with_format(&target, ImageFormat::Png)?;
        Ok(())
    })
    .await?
}
