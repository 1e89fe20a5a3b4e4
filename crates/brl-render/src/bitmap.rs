#![forbid(unsafe_code)]

//! Binary per-pixel masks.
//!
//! A [`Bitmap`] stores one byte per pixel, each either 0 or 1. Row 0 is the
//! BOTTOM row, matching the pixel coordinates of a
//! [`Surface`](crate::surface::Surface), so blitting never flips rows.

use std::fmt;

/// Reasons a raw mask is rejected by [`Bitmap::from_mask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// `data.len()` is not `width * height`.
    LengthMismatch { expected: usize, actual: usize },
    /// A byte other than 0 or 1 at the given index.
    NonBinary { index: usize, value: u8 },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "mask has {actual} bytes, expected {expected}")
            }
            Self::NonBinary { index, value } => {
                write!(f, "mask byte {index} is {value}, expected 0 or 1")
            }
        }
    }
}

impl std::error::Error for MaskError {}

/// Binary pixel mask, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// All-clear bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap an existing mask.
    ///
    /// # Errors
    ///
    /// Fails if the length is not `width * height` or a byte is not 0/1.
    pub fn from_mask(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(MaskError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(MaskError::NonBinary { index, value });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw mask bytes, bottom row first.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate rows from the bottom up.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size.
        let width = (self.width as usize).max(1);
        self.data.chunks_exact(width)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)` with `y = 0` at the bottom.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        self.index(x, y).map(|i| self.data[i] != 0)
    }

    /// Set a pixel. Returns `false` when outside the bitmap.
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = u8::from(value);
                true
            }
            None => false,
        }
    }

    /// Number of set pixels.
    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_clear() {
        let b = Bitmap::new(3, 2);
        assert_eq!(b.as_bytes(), &[0; 6]);
        assert_eq!(b.count_ones(), 0);
    }

    #[test]
    fn from_mask_validates_length() {
        let err = Bitmap::from_mask(2, 2, vec![0; 3]).unwrap_err();
        assert_eq!(
            err,
            MaskError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn from_mask_validates_values() {
        let err = Bitmap::from_mask(2, 1, vec![1, 255]).unwrap_err();
        assert_eq!(err, MaskError::NonBinary { index: 1, value: 255 });
        assert_eq!(err.to_string(), "mask byte 1 is 255, expected 0 or 1");
    }

    #[test]
    fn rows_are_bottom_first() {
        let b = Bitmap::from_mask(2, 2, vec![1, 1, 0, 1]).unwrap();
        let rows: Vec<&[u8]> = b.rows().collect();
        assert_eq!(rows, vec![&[1u8, 1][..], &[0u8, 1][..]]);
        assert_eq!(b.get(0, 1), Some(false));
        assert_eq!(b.get(0, 0), Some(true));
    }

    #[test]
    fn set_and_get() {
        let mut b = Bitmap::new(2, 2);
        assert!(b.set(1, 1, true));
        assert!(!b.set(2, 0, true));
        assert_eq!(b.get(1, 1), Some(true));
        assert_eq!(b.get(2, 2), None);
        assert_eq!(b.count_ones(), 1);
        assert!(b.set(1, 1, false));
        assert_eq!(b.count_ones(), 0);
    }

    #[test]
    fn zero_width_has_no_rows() {
        let b = Bitmap::new(0, 5);
        assert_eq!(b.rows().count(), 0);
    }
}
