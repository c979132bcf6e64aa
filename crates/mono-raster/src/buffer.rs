//! Request-scoped image buffers passed between the conversion stages.

use image::GrayImage;

use crate::{BLACK, Result, WHITE, check_len};

/// Single-channel 8-bit image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayscaleImage {
    /// Wrap a row-major sample buffer of exactly `width * height` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(data.len(), width, height, 1)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Convert into an `image` crate buffer.
    pub fn to_gray_image(&self) -> Option<GrayImage> {
        GrayImage::from_raw(self.width, self.height, self.data.clone())
    }
}

impl TryFrom<GrayImage> for GrayscaleImage {
    type Error = crate::RasterError;

    fn try_from(img: GrayImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}

/// Dithered image whose samples are all [`WHITE`] or [`BLACK`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonochromeImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MonochromeImage {
    /// Wrap a row-major buffer of `width * height` samples.
    ///
    /// Sample values are not checked; see [`MonochromeImage::is_binary`].
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(data.len(), width, height, 1)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// True when every sample is exactly [`WHITE`] or [`BLACK`].
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&v| v == WHITE || v == BLACK)
    }

    /// Convert into an `image` crate buffer, e.g. for writing a preview.
    pub fn to_gray_image(&self) -> Option<GrayImage> {
        GrayImage::from_raw(self.width, self.height, self.data.clone())
    }
}

/// Printer-ready bitmap: 8 pixels per byte, MSB first, 1 = black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PackedBitmap {
    /// Only the packer builds bitmaps, so the layout invariant holds by construction.
    pub(crate) fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize / 8) * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels (always a multiple of 8).
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.width as usize / 8
    }

    /// Iterate over the packed rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.bytes_per_row())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RasterError;

    #[test]
    fn test_grayscale_new_validates_length() {
        assert!(GrayscaleImage::new(3, 2, vec![0; 6]).is_ok());
        assert!(matches!(
            GrayscaleImage::new(3, 2, vec![0; 5]),
            Err(RasterError::InvalidDimension(_))
        ));
        assert!(matches!(
            GrayscaleImage::new(0, 2, Vec::new()),
            Err(RasterError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_grayscale_from_gray_image() {
        let mut img = GrayImage::new(2, 2);
        img.put_pixel(1, 0, image::Luma([42]));
        let gray = GrayscaleImage::try_from(img).unwrap();
        assert_eq!(gray.width(), 2);
        assert_eq!(gray.height(), 2);
        assert_eq!(gray.as_bytes(), &[0, 42, 0, 0]);
    }

    #[test]
    fn test_grayscale_to_gray_image() {
        let gray = GrayscaleImage::new(2, 1, vec![7, 9]).unwrap();
        let img = gray.to_gray_image().unwrap();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(1, 0).0[0], 9);
    }

    #[test]
    fn test_monochrome_is_binary() {
        let mono = MonochromeImage::new(3, 1, vec![0, 255, 0]).unwrap();
        assert!(mono.is_binary());
        let mono = MonochromeImage::new(3, 1, vec![0, 254, 0]).unwrap();
        assert!(!mono.is_binary());
    }

    #[test]
    fn test_monochrome_preview_keeps_pixels() {
        let mono = MonochromeImage::new(2, 1, vec![255, 0]).unwrap();
        let img = mono.to_gray_image().unwrap();
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
        assert_eq!(img.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn test_packed_rows() {
        let bitmap = PackedBitmap::from_packed(16, 2, vec![1, 2, 3, 4]);
        assert_eq!(bitmap.bytes_per_row(), 2);
        let rows: Vec<&[u8]> = bitmap.rows().collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3u8, 4][..]]);
    }
}
