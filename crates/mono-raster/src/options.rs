//! Conversion configuration options.
//!
//! These options select the input pixel layout and how error diffusion
//! treats values pushed outside the 8-bit range.

use crate::gray::PixelLayout;

/// Arithmetic used when diffused error is added to a not-yet-visited pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Accumulate in the 8-bit sample itself, wrapping modulo 256.
    ///
    /// Output is byte-compatible with converters that diffuse into 8-bit buffers.
    #[default]
    Wrap,

    /// Accumulate in a wider signed integer so no value ever wraps.
    Widen,
}

/// Configuration options for [`crate::convert()`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Channel layout of the color buffer.
    pub layout: PixelLayout,

    /// Diffusion accumulation policy.
    pub overflow: Overflow,
}

impl ConvertOptions {
    /// Create options with defaults (RGBA input, wrapping accumulation).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the input pixel layout.
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Builder: set the diffusion overflow policy.
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.layout, PixelLayout::Rgba);
        assert_eq!(opts.overflow, Overflow::Wrap);
    }

    #[test]
    fn test_builder_chain() {
        let opts = ConvertOptions::new()
            .with_layout(PixelLayout::Gray)
            .with_overflow(Overflow::Widen);

        assert_eq!(opts.layout, PixelLayout::Gray);
        assert_eq!(opts.overflow, Overflow::Widen);
    }
}
