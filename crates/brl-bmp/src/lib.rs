#![forbid(unsafe_code)]

//! 24-bit raster decoding into binary dot masks.
//!
//! Reads the BMP-family container used for sprite art and thresholds every
//! pixel: pure white (`FF FF FF`) is background and decodes to 0, any other
//! colour decodes to 1.
//!
//! # Binary contract
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | `0x00` | 2 | signature `BM` |
//! | `0x0A` | 4 | pixel data offset (LE) |
//! | `0x12` | 4 | width in pixels (LE) |
//! | `0x16` | 4 | height in pixels (LE) |
//!
//! Pixel data is `width × height` packed blue/green/red triples starting at
//! the data offset. Rows are NOT padded to four bytes; images must be saved
//! without padding (any width whose row size is a multiple of four works
//! with standard encoders too).
//!
//! # Row order
//!
//! The container stores the bottom row first. Rows are kept in file order,
//! so row 0 of the resulting [`Bitmap`] is the bottom of the image, which is
//! exactly the pixel convention of [`brl_render::Surface`].

use std::fs;
use std::path::{Path, PathBuf};

use brl_render::Bitmap;
use thiserror::Error;

/// Offset of the pixel data offset field.
pub const DATA_OFFSET_FIELD: usize = 0x0A;
/// Offset of the width field.
pub const WIDTH_FIELD: usize = 0x12;
/// Offset of the height field.
pub const HEIGHT_FIELD: usize = 0x16;
/// Smallest input that contains every header field.
pub const MIN_HEADER_LEN: usize = HEIGHT_FIELD + 4;
/// Bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 3;

const SIGNATURE: [u8; 2] = *b"BM";
const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Errors raised while loading a raster.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input is {len} bytes, header needs {}", MIN_HEADER_LEN)]
    TooShort { len: usize },
    #[error("bad signature {found:02x?}, expected \"BM\"")]
    BadSignature { found: [u8; 2] },
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("pixel data needs {needed} bytes, input has {available}")]
    Truncated { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Header fields the decoder relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
}

impl Header {
    /// Parse and validate the fixed header fields.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_HEADER_LEN {
            return Err(DecodeError::TooShort { len: bytes.len() });
        }
        if bytes[..2] != SIGNATURE {
            return Err(DecodeError::BadSignature {
                found: [bytes[0], bytes[1]],
            });
        }

        let data_offset = read_u32_le(bytes, DATA_OFFSET_FIELD);
        let width = read_u32_le(bytes, WIDTH_FIELD) as i32;
        let height = read_u32_le(bytes, HEIGHT_FIELD) as i32;
        if width <= 0 || height <= 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }

        Ok(Self {
            data_offset,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Byte length of the pixel data, `None` on overflow.
    pub fn data_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(BYTES_PER_PIXEL)
    }
}

#[inline]
fn read_u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Decode an in-memory raster into a binary mask.
///
/// # Errors
///
/// Fails on a short or unsigned header, non-positive dimensions, or pixel
/// data that runs past the end of `bytes`.
pub fn decode(bytes: &[u8]) -> Result<Bitmap> {
    let header = Header::parse(bytes)?;
    let start = header.data_offset as usize;
    let needed = header
        .data_len()
        .and_then(|len| len.checked_add(start))
        .ok_or(DecodeError::InvalidDimensions {
            width: header.width as i32,
            height: header.height as i32,
        })?;
    if needed > bytes.len() {
        return Err(DecodeError::Truncated {
            needed,
            available: bytes.len(),
        });
    }

    let mask: Vec<u8> = bytes[start..needed]
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|bgr| u8::from(bgr != WHITE))
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        width = header.width,
        height = header.height,
        set = mask.iter().filter(|&&v| v != 0).count(),
        "raster decoded"
    );

    Bitmap::from_mask(header.width, header.height, mask).map_err(|_| {
        DecodeError::InvalidDimensions {
            width: header.width as i32,
            height: header.height as i32,
        }
    })
}

/// Read and decode a raster file.
///
/// # Errors
///
/// Returns [`DecodeError::Io`] if the file cannot be read, otherwise the
/// errors of [`decode`].
pub fn load(path: impl AsRef<Path>) -> Result<Bitmap> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}
