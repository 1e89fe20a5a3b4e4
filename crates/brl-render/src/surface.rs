#![forbid(unsafe_code)]

//! Surface: a grid of braille cells addressed as dots.
//!
//! A `Surface` is `width × height` cells stored row-major, top row first.
//! Each cell byte is the braille dot mask of one glyph, so the addressable
//! pixel space is `width * 2` by `height * 4`.
//!
//! Pixel `y` grows upward: pixel row 0 lives in the LAST stored cell row.
//!
//! # Dot layout inside a cell
//!
//! ```text
//!        col 0  col 1
//! row 3    1      8     (top)
//! row 2    2     16
//! row 1    4     32
//! row 0   64    128     (bottom)
//! ```

/// Dots per cell horizontally.
pub const DOTS_X: u32 = 2;

/// Dots per cell vertically.
pub const DOTS_Y: u32 = 4;

/// Bit value of each dot, indexed `[row][col]` with row 0 at the bottom.
pub const DOT_BITS: [[u8; DOTS_X as usize]; DOTS_Y as usize] =
    [[64, 128], [4, 32], [2, 16], [1, 8]];

/// Flat braille cell buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<u8>,
}

impl Surface {
    /// Create a zero-filled surface of `width × height` cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Width in dots.
    #[inline]
    pub const fn pixel_width(&self) -> u32 {
        self.width as u32 * DOTS_X
    }

    /// Height in dots.
    #[inline]
    pub const fn pixel_height(&self) -> u32 {
        self.height as u32 * DOTS_Y
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cell bytes, top row first.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Cell value at a display position (row 0 = top).
    pub fn cell(&self, col: u16, row: u16) -> Option<u8> {
        if col < self.width && row < self.height {
            Some(self.cells[row as usize * self.width as usize + col as usize])
        } else {
            None
        }
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Reallocate for a new size. Contents are cleared.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, 0);
    }

    /// Read a single dot. `None` when outside the pixel space.
    pub fn dot(&self, x: u32, y: u32) -> Option<bool> {
        let (index, bit) = self.locate(x, y)?;
        Some(self.cells[index] & bit != 0)
    }

    /// Number of lit dots across the whole surface.
    pub fn count_dots(&self) -> u32 {
        self.cells.iter().map(|c| c.count_ones()).sum()
    }

    /// Set or clear one integer pixel. Returns `false` when out of range.
    pub(crate) fn write_dot(&mut self, x: u32, y: u32, value: bool) -> bool {
        let Some((index, bit)) = self.locate(x, y) else {
            return false;
        };
        if value {
            self.cells[index] |= bit;
        } else {
            self.cells[index] &= !bit;
        }
        true
    }

    /// Map a pixel to its cell offset and dot bit.
    #[inline]
    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.pixel_width() || y >= self.pixel_height() {
            return None;
        }
        let row = self.height as usize - 1 - (y / DOTS_Y) as usize;
        let col = (x / DOTS_X) as usize;
        let bit = DOT_BITS[(y % DOTS_Y) as usize][(x % DOTS_X) as usize];
        Some((row * self.width as usize + col, bit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_zeroed() {
        let s = Surface::new(80, 24);
        assert_eq!(s.len(), 80 * 24);
        assert!(s.cells().iter().all(|&c| c == 0));
        assert_eq!(s.pixel_width(), 160);
        assert_eq!(s.pixel_height(), 96);
    }

    #[test]
    fn dot_bits_cover_every_bit_once() {
        let mut seen = 0u8;
        for row in DOT_BITS {
            for bit in row {
                assert_eq!(seen & bit, 0, "bit {bit} repeated");
                seen |= bit;
            }
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn origin_is_bottom_left_dot() {
        let mut s = Surface::new(3, 2);
        assert!(s.write_dot(0, 0, true));
        assert_eq!(s.cell(0, 1), Some(64));
        assert_eq!(s.cell(0, 0), Some(0));
    }

    #[test]
    fn top_right_dot() {
        let mut s = Surface::new(3, 2);
        assert!(s.write_dot(5, 7, true));
        assert_eq!(s.cell(2, 0), Some(8));
    }

    #[test]
    fn clear_bit_leaves_neighbours() {
        let mut s = Surface::new(1, 1);
        for y in 0..4 {
            for x in 0..2 {
                s.write_dot(x, y, true);
            }
        }
        assert_eq!(s.cell(0, 0), Some(0xFF));
        s.write_dot(1, 2, false);
        assert_eq!(s.cell(0, 0), Some(0xFF & !16));
        assert_eq!(s.dot(1, 2), Some(false));
        assert_eq!(s.dot(0, 2), Some(true));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut s = Surface::new(2, 2);
        assert!(!s.write_dot(4, 0, true));
        assert!(!s.write_dot(0, 8, true));
        assert_eq!(s.dot(4, 0), None);
        assert_eq!(s.count_dots(), 0);
    }

    #[test]
    fn clear_and_resize() {
        let mut s = Surface::new(2, 2);
        s.write_dot(1, 1, true);
        s.clear();
        assert_eq!(s.count_dots(), 0);

        s.write_dot(1, 1, true);
        s.resize(5, 3);
        assert_eq!((s.width(), s.height()), (5, 3));
        assert_eq!(s.len(), 15);
        assert_eq!(s.count_dots(), 0);
    }

    #[test]
    fn zero_sized_surface() {
        let s = Surface::new(0, 0);
        assert!(s.is_empty());
        assert_eq!(s.dot(0, 0), None);
        assert_eq!(s.cell(0, 0), None);
    }
}
