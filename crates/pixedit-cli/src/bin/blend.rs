//! Blend two image files by linear interpolation.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pixedit_cli::init_tracing;
use pixedit_core::blend::blend_images;
use pixedit_core::codec::{load_image, save_image, DEFAULT_JPEG_QUALITY};
use tracing::info;

#[derive(Parser)]
#[command(name = "pixedit-blend", about = "Blend two images: (1 - alpha) * base + alpha * other")]
struct Args {
    /// Base image; the output keeps its dimensions
    base: PathBuf,
    /// Image blended over the base, resized to match it
    other: PathBuf,
    /// Weight of the second image (0 to 1)
    #[arg(short, long, default_value_t = 0.5)]
    alpha: f32,
    /// Output file; the extension selects the format
    #[arg(short, long, default_value = "manual_blend.jpg")]
    output: PathBuf,
    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,
}

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let base = load_image(&args.base).context("Failed to load base image")?;
    let other = load_image(&args.other).context("Failed to load second image")?;

    let blended = blend_images(&base, &other, args.alpha)?;
    save_image(&blended, &args.output, args.quality)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        path = %args.output.display(),
        width = blended.width,
        height = blended.height,
        "Blend written"
    );
    println!("Blended image saved as {}", args.output.display());
    Ok(())
}
