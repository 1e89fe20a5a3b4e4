#![forbid(unsafe_code)]

//! Drawing primitives built on a single point plotter.
//!
//! [`Draw::plot`] is the only operation a target has to provide. Lines,
//! curves, rectangles and bitmaps are all expressed as repeated plots.
//!
//! # Clipping
//!
//! `plot` reports [`OutOfBounds`] for coordinates outside the pixel space and
//! leaves the target untouched. Every higher-level primitive drops those
//! points silently: a shape that extends past the edge is drawn partially.

use std::fmt;

use crate::bitmap::Bitmap;
use crate::surface::Surface;

/// Largest coordinate magnitude the line rasterizer accepts.
///
/// Beyond 2^24 an `f32` can no longer represent unit steps.
pub const MAX_COORD: f32 = 16_777_216.0;

/// Horizontal step used to sample curves.
pub const CURVE_STEP: f32 = 0.2;

/// Largest `x` magnitude the curve rasterizer accepts.
///
/// Past 2^22 adding [`CURVE_STEP`] to an `f32` no longer changes it.
pub const CURVE_MAX_COORD: f32 = 2_097_152.0;

/// Vertical compression applied to curve samples.
pub const CURVE_Y_SCALE: i32 = 10;

/// A plot coordinate fell outside the addressable pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfBounds {
    pub x: f32,
    pub y: f32,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point ({}, {}) is outside the surface", self.x, self.y)
    }
}

impl std::error::Error for OutOfBounds {}

/// Rectangle fill style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RectMode {
    /// Every dot inside the rectangle.
    #[default]
    Filled,
    /// Perimeter only, each corner plotted once.
    Outline,
}

/// Round half up to an integer pixel, or `None` if not a valid index.
#[inline]
fn to_pixel(v: f32, limit: u32) -> Option<u32> {
    let rounded = (v + 0.5).floor();
    // NaN fails both comparisons.
    if rounded >= 0.0 && rounded < limit as f32 {
        Some(rounded as u32)
    } else {
        None
    }
}

#[inline]
fn in_range(v: f32) -> bool {
    v.is_finite() && v.abs() <= MAX_COORD
}

/// Dot-level drawing operations.
pub trait Draw {
    /// Set (`value = true`) or clear one dot at a continuous coordinate.
    ///
    /// Coordinates are rounded half up. Other dots of the same cell are
    /// never touched, so separate plots accumulate inside one glyph.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the rounded point lies outside the pixel
    /// space. Nothing is modified in that case.
    fn plot(&mut self, x: f32, y: f32, value: bool) -> Result<(), OutOfBounds>;

    /// Pixel extent `(width, height)` of the target, if known.
    ///
    /// Rectangles skip rows and columns outside it instead of plotting them.
    fn clip_bounds(&self) -> Option<(u32, u32)> {
        None
    }

    /// Draw a straight segment from `(x1, y1)` toward `(x2, y2)`.
    ///
    /// The start point is always plotted. Shallow lines (`|slope| < 1`) step
    /// one pixel in x per plot, steep lines one pixel in y. Stepping stops as
    /// soon as both axes are within one pixel of the end, so the exact end
    /// point may be left unplotted.
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        if ![x1, y1, x2, y2].into_iter().all(in_range) {
            return;
        }

        let (mut x, mut y) = (x1, y1);
        let _ = self.plot(x, y, true);

        if x1 == x2 {
            while (y - y2).abs() > 1.0 {
                y += if y < y2 { 1.0 } else { -1.0 };
                let _ = self.plot(x, y, true);
            }
            return;
        }

        let slope = (y2 - y1) / (x2 - x1);
        let intercept = y1 - slope * x1;

        while (x - x2).abs() > 1.0 || (y - y2).abs() > 1.0 {
            if slope.abs() < 1.0 {
                x += if x < x2 { 1.0 } else { -1.0 };
                y = x * slope + intercept;
            } else {
                y += if y < y2 { 1.0 } else { -1.0 };
                x = (y - intercept) / slope;
            }
            let _ = self.plot(x, y, true);
        }
    }

    /// Sample `y = a·x² + b·x + c` for `x` in `(x_start, x_end]`.
    ///
    /// `x` advances by [`CURVE_STEP`] before each sample. The value is
    /// truncated to an integer and divided by [`CURVE_Y_SCALE`]; no gaps
    /// between samples are filled. Bounds that are not finite or exceed
    /// [`CURVE_MAX_COORD`] draw nothing.
    fn draw_curve(&mut self, x_start: f32, x_end: f32, a: f32, b: f32, c: f32) {
        let valid = |v: f32| v.is_finite() && v.abs() <= CURVE_MAX_COORD;
        if !valid(x_start) || !valid(x_end) {
            return;
        }

        let mut x = x_start;
        while x < x_end {
            x += CURVE_STEP;
            let y = (a * (x * x) + b * x + c) as i32 / CURVE_Y_SCALE;
            let _ = self.plot(x, y as f32, true);
        }
    }

    /// Draw a `w × h` rectangle whose bottom-left dot is `(x, y)`.
    ///
    /// Non-positive sizes draw nothing. Corners are computed in `i64`, so
    /// rectangles reaching past `i32::MAX` are clipped like any other.
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, mode: RectMode) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (left, bottom) = (i64::from(x), i64::from(y));
        let right = left + i64::from(w) - 1;
        let top = bottom + i64::from(h) - 1;

        let (cols, rows) = match self.clip_bounds() {
            Some((pw, ph)) => (
                left.max(0)..=right.min(i64::from(pw) - 1),
                bottom.max(0)..=top.min(i64::from(ph) - 1),
            ),
            None => (left..=right, bottom..=top),
        };
        let mut put = |px: i64, py: i64| {
            let _ = self.plot(px as f32, py as f32, true);
        };

        match mode {
            RectMode::Filled => {
                for py in rows {
                    for px in cols.clone() {
                        put(px, py);
                    }
                }
            }
            RectMode::Outline => {
                for px in cols {
                    put(px, bottom);
                    put(px, top);
                }
                for py in rows.filter(|&py| py != bottom && py != top) {
                    put(left, py);
                    put(right, py);
                }
            }
        }
    }

    /// Copy a bitmap with its bottom-left pixel at `(x, y)`.
    ///
    /// Set pixels light dots and clear pixels erase them, so the bitmap
    /// fully replaces the covered region.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        for (row, line) in bitmap.rows().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                let px = x as f32 + col as f32;
                let py = y as f32 + row as f32;
                let _ = self.plot(px, py, value != 0);
            }
        }
    }
}

impl Draw for Surface {
    fn plot(&mut self, x: f32, y: f32, value: bool) -> Result<(), OutOfBounds> {
        let px = to_pixel(x, self.pixel_width());
        let py = to_pixel(y, self.pixel_height());
        if let (Some(px), Some(py)) = (px, py) {
            if self.write_dot(px, py, value) {
                return Ok(());
            }
        }
        Err(OutOfBounds { x, y })
    }

    fn clip_bounds(&self) -> Option<(u32, u32)> {
        Some((self.pixel_width(), self.pixel_height()))
    }
}
