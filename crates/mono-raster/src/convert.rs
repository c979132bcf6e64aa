//! End-to-end conversion and the raw byte-buffer API.

use tracing::debug;

use crate::buffer::{GrayscaleImage, MonochromeImage, PackedBitmap};
use crate::gray::to_grayscale;
use crate::options::ConvertOptions;
use crate::{Result, dither, pack};

/// Dither a raw grayscale buffer of `width * height` bytes.
///
/// Returns a buffer of the same length holding only 0 and 255.
pub fn dither_buffer(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let gray = GrayscaleImage::new(width, height, buffer.to_vec())?;
    Ok(dither::dither(&gray)?.into_bytes())
}

/// Pack a raw monochrome buffer of `width * height` bytes.
///
/// Returns exactly `width / 8 * height` bytes.
pub fn pack_buffer(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mono = MonochromeImage::new(width, height, buffer.to_vec())?;
    Ok(pack::pack(&mono)?.into_bytes())
}

/// Convert a color buffer into a printer bitmap: grayscale, dither, pack.
pub fn convert(
    color: &[u8],
    width: u32,
    height: u32,
    options: &ConvertOptions,
) -> Result<PackedBitmap> {
    debug!(width, height, ?options, "Converting image to printer raster");
    let gray = to_grayscale(color, width, height, options.layout)?;
    let mono = dither::dither_with(&gray, options.overflow)?;
    pack::pack(&mono)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gray::PixelLayout;
    use crate::options::Overflow;
    use crate::{BLACK, RasterError, WHITE};

    #[test]
    fn test_dither_buffer_binary_output() {
        let input: Vec<u8> = (0..64).map(|v| (v * 4) as u8).collect();
        let out = dither_buffer(&input, 8, 8).unwrap();
        assert_eq!(out.len(), 64);
        assert!(out.iter().all(|&v| v == WHITE || v == BLACK));
    }

    #[test]
    fn test_dither_buffer_rejects_bad_dimensions() {
        assert!(matches!(
            dither_buffer(&[], 0, 1),
            Err(RasterError::InvalidDimension(_))
        ));
        assert!(matches!(
            dither_buffer(&[0; 10], 3, 3),
            Err(RasterError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_dither_buffer_allows_any_width() {
        let out = dither_buffer(&[10, 250, 10], 3, 1).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_pack_buffer_light_and_dark() {
        let light = dither_buffer(&[200; 16], 16, 1).unwrap();
        assert_eq!(pack_buffer(&light, 16, 1).unwrap(), vec![0x00, 0x00]);

        let dark = dither_buffer(&[50; 16], 16, 1).unwrap();
        assert_eq!(pack_buffer(&dark, 16, 1).unwrap(), vec![0xff, 0xff]);
    }

    #[test]
    fn test_pack_buffer_rejects_bad_dimensions() {
        assert!(matches!(
            pack_buffer(&[WHITE; 12], 12, 1),
            Err(RasterError::InvalidDimension(_))
        ));
        assert!(matches!(
            pack_buffer(&[WHITE; 8], 8, 2),
            Err(RasterError::InvalidDimension(_))
        ));
        assert!(matches!(
            pack_buffer(&[], 8, 0),
            Err(RasterError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_convert_rgba_pipeline() {
        // 8x2: white top row, black bottom row
        let mut color = Vec::new();
        for _ in 0..8 {
            color.extend_from_slice(&[255, 255, 255, 255]);
        }
        for _ in 0..8 {
            color.extend_from_slice(&[0, 0, 0, 255]);
        }
        let bitmap = convert(&color, 8, 2, &ConvertOptions::default()).unwrap();
        assert_eq!(bitmap.as_bytes(), &[0x00, 0xff]);
    }

    #[test]
    fn test_convert_gray_layout_matches_byte_api() {
        let gray: Vec<u8> = (0..32u32).map(|v| (v * 8) as u8).collect();
        let opts = ConvertOptions::new().with_layout(PixelLayout::Gray);
        let bitmap = convert(&gray, 16, 2, &opts).unwrap();

        let expected = pack_buffer(&dither_buffer(&gray, 16, 2).unwrap(), 16, 2).unwrap();
        assert_eq!(bitmap.into_bytes(), expected);
    }

    #[test]
    fn test_convert_widen_policy() {
        // same fixture as the dither overflow test, padded to a packable width
        let mut gray = vec![120, 250, 0];
        gray.extend_from_slice(&[0; 5]);
        let opts = ConvertOptions::new()
            .with_layout(PixelLayout::Gray)
            .with_overflow(Overflow::Widen);
        let bitmap = convert(&gray, 8, 1, &opts).unwrap();
        assert_eq!(bitmap.as_bytes(), &[0b1011_1111]);
    }

    #[test]
    fn test_convert_rejects_stride_mismatch() {
        let opts = ConvertOptions::new().with_layout(PixelLayout::Rgb);
        assert!(matches!(
            convert(&[0; 32], 8, 1, &opts),
            Err(RasterError::InvalidDimension(_))
        ));
    }
}
