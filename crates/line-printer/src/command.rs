//! Raster print and paper feed commands.

use mono_raster::PackedBitmap;
use tracing::debug;

use crate::{
    BYTES_PER_LINE, MAX_RASTER_HEIGHT, MAX_TRANSFER_SIZE, PRINT_WIDTH, PrinterError, Result,
};

// -- Command bytes --
const FS: u8 = 0x1c;
const ESC: u8 = 0x1b;
const CMD_RASTER: u8 = 0x2a;
const RASTER_MODE: u8 = 0x65;
const CMD_FEED: u8 = 0x4a;

/// Build the raster header: FS * mode + height (2 bytes, big-endian).
pub fn build_raster_header(height: u32) -> Result<[u8; 5]> {
    if height > MAX_RASTER_HEIGHT {
        return Err(PrinterError::RasterTooTall(height));
    }
    let [hi, lo] = (height as u16).to_be_bytes();
    Ok([FS, CMD_RASTER, RASTER_MODE, hi, lo])
}

/// Build a paper feed command: ESC J n.
pub fn build_feed_command(pixels: u32) -> Result<[u8; 3]> {
    let n = u8::try_from(pixels).map_err(|_| PrinterError::FeedOutOfRange(pixels))?;
    Ok([ESC, CMD_FEED, n])
}

/// A packed bitmap framed for the printer.
#[derive(Debug, Clone)]
pub struct RasterJob<'a> {
    header: [u8; 5],
    data: &'a [u8],
    feed: Option<[u8; 3]>,
}

impl<'a> RasterJob<'a> {
    /// Frame a bitmap; it must be exactly [`PRINT_WIDTH`] dots wide.
    pub fn new(bitmap: &'a PackedBitmap) -> Result<Self> {
        if bitmap.width() != PRINT_WIDTH {
            return Err(PrinterError::InvalidRasterWidth {
                expected: PRINT_WIDTH,
                actual: bitmap.width(),
            });
        }
        debug_assert_eq!(bitmap.bytes_per_row(), BYTES_PER_LINE);
        let header = build_raster_header(bitmap.height())?;
        debug!(height = bitmap.height(), "Framing raster job");
        Ok(Self {
            header,
            data: bitmap.as_bytes(),
            feed: None,
        })
    }

    /// Builder: feed paper by `pixels` after the image.
    pub fn with_feed(mut self, pixels: u32) -> Result<Self> {
        self.feed = Some(build_feed_command(pixels)?);
        Ok(self)
    }

    /// Writes to send in order: header, image data split into transfers of
    /// at most [`MAX_TRANSFER_SIZE`] bytes, then the optional feed.
    pub fn transfers(&self) -> impl Iterator<Item = &[u8]> {
        std::iter::once(&self.header[..])
            .chain(self.data.chunks(MAX_TRANSFER_SIZE))
            .chain(self.feed.as_ref().map(|f| &f[..]))
    }

    /// Concatenate all transfers into one stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.len() + self.data.len() + 3);
        for chunk in self.transfers() {
            out.extend_from_slice(chunk);
        }
        out
    }
}
