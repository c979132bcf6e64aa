//! Command framing for 384-dot line thermal printers.
//!
//! Builds the byte sequences that carry a packed raster bitmap, paper feed
//! and printer-rendered QR codes. Transport is left to the caller.

pub mod command;
pub mod qr;

// Re-exports for convenience
pub use command::{RasterJob, build_feed_command, build_raster_header};
pub use qr::{QrErrorCorrection, build_qr_command};

/// Print width in dots.
pub const PRINT_WIDTH: u32 = 384;

/// Packed bytes per raster line.
pub const BYTES_PER_LINE: usize = PRINT_WIDTH as usize / 8;

/// Largest height the raster command can address.
pub const MAX_RASTER_HEIGHT: u32 = 0xffff;

/// Largest single write accepted by the printer's USB serial bridge.
pub const MAX_TRANSFER_SIZE: usize = 16384;

/// Errors that can occur while building printer commands.
#[derive(Debug, thiserror::Error)]
pub enum PrinterError {
    #[error("Invalid raster width: expected {expected}, got {actual}")]
    InvalidRasterWidth { expected: u32, actual: u32 },

    #[error("Raster height {0} exceeds 65535 lines")]
    RasterTooTall(u32),

    #[error("Feed distance must be between 0 and 255 pixels, got {0}")]
    FeedOutOfRange(u32),

    #[error("QR payload of {actual} bytes exceeds {max} for level {level:?}")]
    QrPayloadTooLong {
        level: QrErrorCorrection,
        max: usize,
        actual: usize,
    },
}

/// Result type alias for printer command operations.
pub type Result<T> = std::result::Result<T, PrinterError>;
