#![forbid(unsafe_code)]

//! Precomputed UTF-8 encodings for every braille glyph.
//!
//! Unicode reserves U+2800..=U+28FF for braille patterns, and the low byte
//! of the code point is exactly the dot bitmask. Every one of those scalars
//! encodes to three bytes (`1110xxxx 10xxxxxx 10xxxxxx`), so a cell value
//! maps to a fixed-size glyph that can be copied straight into a frame.

/// First code point of the braille pattern block.
pub const BRAILLE_BASE: u32 = 0x2800;

/// Encoded length of every braille glyph.
pub const GLYPH_LEN: usize = 3;

/// Lookup table from a cell byte to its encoded braille glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotTable {
    glyphs: [[u8; GLYPH_LEN]; 256],
}

impl DotTable {
    /// Build the table for all 256 cell values.
    pub const fn new() -> Self {
        let mut glyphs = [[0u8; GLYPH_LEN]; 256];
        let mut value = 0;
        while value < 256 {
            glyphs[value] = encode(BRAILLE_BASE + value as u32);
            value += 1;
        }
        Self { glyphs }
    }

    /// Encoded glyph for a cell value.
    #[inline]
    pub const fn glyph(&self, value: u8) -> &[u8; GLYPH_LEN] {
        &self.glyphs[value as usize]
    }

    /// The braille character for a cell value.
    #[inline]
    pub fn char_for(value: u8) -> char {
        // U+2800..=U+28FF are all assigned scalar values.
        char::from_u32(BRAILLE_BASE + u32::from(value)).unwrap_or('\u{2800}')
    }

    /// Recover the cell value from a braille character.
    ///
    /// Returns `None` for anything outside the braille block.
    #[inline]
    pub fn value_of(ch: char) -> Option<u8> {
        let offset = u32::from(ch).checked_sub(BRAILLE_BASE)?;
        u8::try_from(offset).ok()
    }
}

impl Default for DotTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Three-byte UTF-8 encoding for a code point in U+0800..=U+FFFF.
const fn encode(code_point: u32) -> [u8; GLYPH_LEN] {
    [
        0xE0 | ((code_point & 0xF000) >> 12) as u8,
        0x80 | ((code_point & 0x0FC0) >> 6) as u8,
        0x80 | (code_point & 0x003F) as u8,
    ]
}
