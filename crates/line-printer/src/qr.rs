//! Printer-rendered QR code command.
//!
//! The printer draws the symbol itself from the text payload; no raster
//! data is sent.

use crate::{PrinterError, Result};

const GS: u8 = 0x1d;
const CMD_QR: u8 = 0x78;

/// QR error correction level with the printer's payload limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl QrErrorCorrection {
    /// Level byte sent to the printer.
    pub fn code(self) -> u8 {
        match self {
            Self::L => 0x4c,
            Self::M => 0x4d,
            Self::Q => 0x51,
            Self::H => 0x48,
        }
    }

    /// Maximum payload length in bytes.
    pub fn max_len(self) -> usize {
        match self {
            Self::L => 154,
            Self::M => 122,
            Self::Q => 86,
            Self::H => 64,
        }
    }
}

/// Build a QR print command: GS x level len + UTF-8 payload.
pub fn build_qr_command(level: QrErrorCorrection, text: &str) -> Result<Vec<u8>> {
    let payload = text.as_bytes();
    if payload.len() > level.max_len() {
        return Err(PrinterError::QrPayloadTooLong {
            level,
            max: level.max_len(),
            actual: payload.len(),
        });
    }
    let mut buf = Vec::with_capacity(4 + payload.len());
    buf.extend_from_slice(&[GS, CMD_QR, level.code(), payload.len() as u8]);
    buf.extend_from_slice(payload);
    Ok(buf)
}
