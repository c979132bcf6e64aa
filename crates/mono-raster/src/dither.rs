//! Serpentine Floyd-Steinberg error diffusion.
//!
//! Even rows are scanned left to right, odd rows right to left. Each
//! visited pixel is thresholded and its residual pushed onto four
//! not-yet-visited neighbors:
//!
//! ```text
//! Forward rows:          Reverse rows:
//!      *   7               7   *
//!  3   5   1               1   5   3
//! ```
//!
//! Weights are in sixteenths and each fragment is truncated toward zero on
//! its own, so a few units of residual are lost per pixel. Neighbors outside
//! the image are skipped and their share is dropped.

use tracing::debug;

use crate::buffer::{GrayscaleImage, MonochromeImage};
use crate::options::Overflow;
use crate::{BLACK, Result, THRESHOLD, WHITE, alloc_buffer};

/// One diffusion target relative to the current pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tap {
    pub dx: isize,
    pub dy: isize,
    /// Share of the residual, in sixteenths.
    pub weight: i32,
}

const FORWARD_TAPS: [Tap; 4] = [
    Tap { dx: 1, dy: 0, weight: 7 },
    Tap { dx: -1, dy: 1, weight: 3 },
    Tap { dx: 0, dy: 1, weight: 5 },
    Tap { dx: 1, dy: 1, weight: 1 },
];

/// Horizontal scan direction of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Left to right.
    Forward,
    /// Right to left.
    Reverse,
}

impl ScanDirection {
    /// Direction for a 0-based row index.
    pub fn for_row(row: usize) -> Self {
        if row % 2 == 0 {
            Self::Forward
        } else {
            Self::Reverse
        }
    }

    /// Column visited at `step` of a row `width` pixels wide.
    pub fn column(self, step: usize, width: usize) -> usize {
        match self {
            Self::Forward => step,
            Self::Reverse => width - 1 - step,
        }
    }

    /// Diffusion targets, mirrored horizontally for reverse rows.
    pub fn taps(self) -> [Tap; 4] {
        match self {
            Self::Forward => FORWARD_TAPS,
            Self::Reverse => FORWARD_TAPS.map(|tap| Tap {
                dx: -tap.dx,
                ..tap
            }),
        }
    }
}

/// Error share for one tap, truncated toward zero.
fn fragment(err: i32, weight: i32) -> i32 {
    err * weight / 16
}

fn quantize(level: i32) -> u8 {
    if level > i32::from(THRESHOLD) {
        WHITE
    } else {
        BLACK
    }
}

/// Storage for a working sample.
trait Cell: Copy {
    fn level(self) -> i32;
    fn store(value: u8) -> Self;
    fn accumulate(self, delta: i32) -> Self;
}

impl Cell for u8 {
    fn level(self) -> i32 {
        i32::from(self)
    }

    fn store(value: u8) -> Self {
        value
    }

    fn accumulate(self, delta: i32) -> Self {
        // low byte of delta, i.e. addition modulo 256
        self.wrapping_add(delta as u8)
    }
}

impl Cell for i32 {
    fn level(self) -> i32 {
        self
    }

    fn store(value: u8) -> Self {
        i32::from(value)
    }

    fn accumulate(self, delta: i32) -> Self {
        self + delta
    }
}

/// Working buffer with bounds-checked neighbor updates.
struct ErrorGrid<C> {
    cells: Vec<C>,
    width: usize,
    height: usize,
}

impl<C: Cell> ErrorGrid<C> {
    /// Threshold the pixel in place and return its signed residual.
    fn quantize_at(&mut self, x: usize, y: usize) -> i32 {
        let idx = y * self.width + x;
        let old = self.cells[idx].level();
        let new = quantize(old);
        self.cells[idx] = C::store(new);
        old - i32::from(new)
    }

    /// Add `delta` at (x, y); no-op outside the image.
    fn add_at(&mut self, x: isize, y: isize, delta: i32) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.cells[idx] = self.cells[idx].accumulate(delta);
    }

    fn diffuse(&mut self) {
        for y in 0..self.height {
            let direction = ScanDirection::for_row(y);
            let taps = direction.taps();
            for step in 0..self.width {
                let x = direction.column(step, self.width);
                let err = self.quantize_at(x, y);
                if err == 0 {
                    continue;
                }
                for tap in taps {
                    self.add_at(
                        x as isize + tap.dx,
                        y as isize + tap.dy,
                        fragment(err, tap.weight),
                    );
                }
            }
        }
    }
}

/// Dither a grayscale image with modulo-256 accumulation.
pub fn dither(gray: &GrayscaleImage) -> Result<MonochromeImage> {
    dither_with(gray, Overflow::Wrap)
}

/// Dither a grayscale image with an explicit overflow policy.
pub fn dither_with(gray: &GrayscaleImage, overflow: Overflow) -> Result<MonochromeImage> {
    let (width, height) = (gray.width(), gray.height());
    debug!(width, height, ?overflow, "Applying serpentine Floyd-Steinberg dithering");

    let len = gray.as_bytes().len();
    let data = match overflow {
        Overflow::Wrap => {
            let mut cells: Vec<u8> = alloc_buffer(len)?;
            cells.extend_from_slice(gray.as_bytes());
            run(cells, width, height)
        }
        Overflow::Widen => {
            let mut cells: Vec<i32> = alloc_buffer(len)?;
            cells.extend(gray.as_bytes().iter().map(|&v| i32::from(v)));
            let widened = run(cells, width, height);
            let mut out: Vec<u8> = alloc_buffer(len)?;
            // every cell was overwritten with WHITE or BLACK
            out.extend(widened.into_iter().map(|v| v as u8));
            out
        }
    };

    debug!("Floyd-Steinberg dithering complete");
    MonochromeImage::new(width, height, data)
}

fn run<C: Cell>(cells: Vec<C>, width: u32, height: u32) -> Vec<C> {
    let mut grid = ErrorGrid {
        cells,
        width: width as usize,
        height: height as usize,
    };
    grid.diffuse();
    grid.cells
}
