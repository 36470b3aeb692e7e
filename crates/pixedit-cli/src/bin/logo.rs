//! Draw the three-ellipse logo and write it to disk.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pixedit_cli::init_tracing;
use pixedit_core::codec::{save_image, DEFAULT_JPEG_QUALITY};
use pixedit_core::logo::{load_font, Logo};
use tracing::info;

#[derive(Parser)]
#[command(name = "pixedit-logo", about = "Draw a three-ellipse logo")]
struct Args {
    /// Output file; the extension selects the format
    #[arg(short, long, default_value = "opencv_logo.jpg")]
    output: PathBuf,
    /// TrueType/OpenType font for the caption (caption is skipped without one)
    #[arg(long)]
    font: Option<PathBuf>,
    /// Caption text
    #[arg(long, default_value = "OpenCV")]
    text: String,
    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,
}

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let font = args
        .font
        .as_ref()
        .map(|path| load_font(path))
        .transpose()
        .context("Failed to load caption font")?;

    let image = Logo::default().with_text(args.text).render(font.as_ref());
    save_image(&image, &args.output, args.quality)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(path = %args.output.display(), "Logo written");
    println!("Logo saved as {}", args.output.display());
    Ok(())
}
