//! Command-line converter from image files to printer raster data.
//!
//! Writes either the bare packed bitmap or a framed job ready to be sent
//! to a 384-dot line printer.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use line_printer::RasterJob;
use mono_raster::{ConvertOptions, Overflow, PackedBitmap, PixelLayout};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OverflowArg {
    /// Wrap accumulated values modulo 256
    Wrap,
    /// Accumulate in a wider integer
    Widen,
}

impl From<OverflowArg> for Overflow {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Wrap => Overflow::Wrap,
            OverflowArg::Widen => Overflow::Widen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Packed bitmap bytes only
    Raw,
    /// Raster header, bitmap and optional feed
    Job,
}

#[derive(Debug, Parser)]
#[command(version, about = "Convert an image into 1-bit printer raster data")]
struct Cli {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output file for the raster data
    #[arg(short, long)]
    output: PathBuf,

    /// Diffusion overflow policy
    #[arg(long, value_enum, default_value_t = OverflowArg::Wrap)]
    overflow: OverflowArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Raw)]
    format: Format,

    /// Paper feed in pixels after the image (job format only)
    #[arg(long, default_value_t = 0)]
    feed: u32,

    /// Also write the dithered image as PNG
    #[arg(long)]
    preview: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.feed > 0 && cli.format != Format::Job {
        bail!("--feed requires --format job");
    }

    let img = image::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    tracing::info!(width, height, input = %cli.input.display(), "Loaded image");

    let options = ConvertOptions::new()
        .with_layout(PixelLayout::Rgba)
        .with_overflow(cli.overflow.into());

    if let Some(path) = &cli.preview {
        write_preview(img.as_raw(), width, height, &options, path)?;
    }

    let bitmap = mono_raster::convert(img.as_raw(), width, height, &options)
        .context("failed to convert image")?;
    let bytes = encode(&bitmap, cli.format, cli.feed)?;

    std::fs::write(&cli.output, &bytes)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!(bytes = bytes.len(), output = %cli.output.display(), "Wrote raster data");
    Ok(())
}

fn encode(bitmap: &PackedBitmap, format: Format, feed: u32) -> anyhow::Result<Vec<u8>> {
    match format {
        Format::Raw => Ok(bitmap.as_bytes().to_vec()),
        Format::Job => {
            let mut job = RasterJob::new(bitmap)?;
            if feed > 0 {
                job = job.with_feed(feed)?;
            }
            Ok(job.to_bytes())
        }
    }
}

fn write_preview(
    color: &[u8],
    width: u32,
    height: u32,
    options: &ConvertOptions,
    path: &Path,
) -> anyhow::Result<()> {
    let gray = mono_raster::to_grayscale(color, width, height, options.layout)?;
    let mono = mono_raster::dither_with(&gray, options.overflow)?;
    let Some(preview) = mono.to_gray_image() else {
        bail!("dithered buffer does not match {width}x{height}");
    };
    preview
        .save(path)
        .with_context(|| format!("failed to write preview {}", path.display()))?;
    tracing::info!(preview = %path.display(), "Wrote preview");
    Ok(())
}
