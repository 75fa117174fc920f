mod cli;
mod scenes;

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pt_renderer::{render_buckets, Image, RenderConfig};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting pt");

    let config = args.apply_overrides(load_config(args.config.as_deref())?);
    config.validate().context("invalid render configuration")?;

    let camera = scenes::build(args.scene).context("failed to build scene")?;
    log::debug!("{camera}");

    log::info!(
        "Rendering {:?} scene at {}x{}, {} spp, {} bounces",
        args.scene,
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();
    let image = render_buckets(&camera, &config, args.bucket_size)?;
    log::info!("Render finished in {:.2?}", start.elapsed());

    save_png(&image, &args.output)?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn save_png(image: &Image, path: &Path) -> Result<()> {
    let buffer = image::RgbImage::from_raw(image.width(), image.height(), image.to_rgb_bytes())
        .context("image buffer does not match its dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
