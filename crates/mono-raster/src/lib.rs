//! Grayscale to 1-bit printer raster conversion.
//!
//! Provides serpentine Floyd-Steinberg dithering and MSB-first bit packing
//! with inverted polarity (1 = ink/heat) for line thermal printers.

pub mod buffer;
pub mod convert;
pub mod dither;
pub mod gray;
pub mod options;
pub mod pack;

// Re-exports for convenience
pub use buffer::{GrayscaleImage, MonochromeImage, PackedBitmap};
pub use convert::{convert, dither_buffer, pack_buffer};
pub use dither::{ScanDirection, dither, dither_with};
pub use gray::{PixelLayout, to_grayscale};
pub use options::{ConvertOptions, Overflow};
pub use pack::pack;

/// Sample value of a white pixel in a monochrome buffer.
pub const WHITE: u8 = 255;

/// Sample value of a black pixel in a monochrome buffer.
pub const BLACK: u8 = 0;

/// Samples strictly above this value quantize to [`WHITE`].
pub const THRESHOLD: u8 = 127;

/// Errors that can occur during raster conversion.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Invalid dimensions: {0}")]
    InvalidDimension(String),

    #[error("Failed to allocate {0} bytes for image buffer")]
    AllocationFailure(usize),
}

/// Result type alias for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;

/// Allocate a zero-length buffer able to hold `len` bytes without reallocating.
///
/// Allocation failure is reported instead of aborting the process.
pub(crate) fn alloc_buffer<T>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| RasterError::AllocationFailure(len.saturating_mul(size_of::<T>())))?;
    Ok(buf)
}

/// Validate that `len` matches `width * height * channels`, returning the
/// expected length.
pub(crate) fn check_len(len: usize, width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimension(format!(
            "width and height must be positive, got {width}x{height}"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            RasterError::InvalidDimension(format!("{width}x{height} image is too large"))
        })?;
    if len != expected {
        return Err(RasterError::InvalidDimension(format!(
            "buffer length {len} does not match {width}x{height}x{channels} = {expected}"
        )));
    }
    Ok(expected)
}
