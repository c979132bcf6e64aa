//! Bit packing of monochrome images into printer raster bytes.

use tracing::debug;

use crate::buffer::{MonochromeImage, PackedBitmap};
use crate::{RasterError, Result, WHITE, alloc_buffer};

/// Pack 8 pixels into one byte, MSB first, with 1 meaning black.
///
/// Bits are first set for white pixels and the byte is then inverted, so
/// any sample other than [`WHITE`] prints as black.
fn pack_group(group: &[u8]) -> u8 {
    let white_bits = group
        .iter()
        .enumerate()
        .filter(|&(_, &px)| px == WHITE)
        .fold(0u8, |acc, (k, _)| acc | (0x80 >> k));
    !white_bits
}

/// Pack a monochrome image into a printer bitmap.
///
/// The width must be a multiple of 8.
pub fn pack(mono: &MonochromeImage) -> Result<PackedBitmap> {
    let (width, height) = (mono.width(), mono.height());
    if width % 8 != 0 {
        return Err(RasterError::InvalidDimension(format!(
            "width must be a multiple of 8 for packing, got {width}"
        )));
    }
    debug!(width, height, "Packing monochrome image");

    let len = mono.as_bytes().len() / 8;
    let mut data: Vec<u8> = alloc_buffer(len)?;
    // rows are whole groups, so groups never straddle a row boundary
    data.extend(mono.as_bytes().chunks_exact(8).map(pack_group));

    Ok(PackedBitmap::from_packed(width, height, data))
}
