//! Color to grayscale reduction.

use tracing::debug;

use crate::buffer::GrayscaleImage;
use crate::{Result, alloc_buffer, check_len};

// BT.601 luma weights in 14-bit fixed point.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Interleaved channel layout of a color buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PixelLayout {
    /// One luma byte per pixel.
    Gray,
    /// R, G, B.
    Rgb,
    /// R, G, B, A. Alpha is ignored.
    #[default]
    Rgba,
}

impl PixelLayout {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = (u32::from(r) * R_WEIGHT + u32::from(g) * G_WEIGHT + u32::from(b) * B_WEIGHT + ROUND)
        >> SHIFT;
    // weights sum to 1 << SHIFT, so y <= 255
    y as u8
}

/// Reduce an interleaved color buffer to a grayscale image.
pub fn to_grayscale(
    color: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<GrayscaleImage> {
    let channels = layout.channels();
    let len = check_len(color.len(), width, height, channels)? / channels;
    debug!(width, height, ?layout, "Reducing to grayscale");

    let mut data: Vec<u8> = alloc_buffer(len)?;
    match layout {
        PixelLayout::Gray => data.extend_from_slice(color),
        PixelLayout::Rgb | PixelLayout::Rgba => {
            data.extend(
                color
                    .chunks_exact(channels)
                    .map(|px| luma(px[0], px[1], px[2])),
            );
        }
    }

    GrayscaleImage::new(width, height, data)
}
