#![forbid(unsafe_code)]

//! Terminal model for presenter validation.
//!
//! A minimal terminal that understands exactly what this crate emits, so
//! presenter output can be checked cell by cell without real terminal I/O.
//!
//! # Scope
//!
//! This is NOT a VT emulator. It supports only:
//! - UTF-8 text with auto-wrap (deferred wrap at the right margin)
//! - Cursor home / position (`CSI H`, `CSI row;col H`)
//! - Erase display (`CSI 2 J`)
//! - Cursor visibility (`CSI ? 25 h` / `CSI ? 25 l`)
//! - CR and LF
//!
//! Output past the last line is discarded rather than scrolled.
//!
//! # Usage
//!
//! ```
//! use brl_render::terminal_model::TerminalModel;
//!
//! let mut model = TerminalModel::new(2, 1);
//! model.process("\x1b[?25l\x1b[H\u{2801}\u{2802}".as_bytes());
//! assert_eq!(model.cell(1, 0), Some('\u{2802}'));
//! assert!(!model.cursor_visible());
//! ```

use crate::dot_table::DotTable;

/// Parser state for escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Ground,
    Escape,
    Csi,
}

/// A minimal terminal grid fed with raw bytes.
#[derive(Debug)]
pub struct TerminalModel {
    width: usize,
    height: usize,
    cells: Vec<char>,
    cursor_x: usize,
    cursor_y: usize,
    pending_wrap: bool,
    cursor_visible: bool,
    parse_state: ParseState,
    csi_params: Vec<u32>,
    csi_private: bool,
    /// Partial UTF-8 sequence.
    utf8: Vec<u8>,
    /// Sequences or bytes the model did not understand.
    unknown: usize,
}

impl TerminalModel {
    /// Create a blank model (all cells are spaces).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
            cursor_x: 0,
            cursor_y: 0,
            pending_wrap: false,
            cursor_visible: true,
            parse_state: ParseState::Ground,
            csi_params: Vec::with_capacity(4),
            csi_private: false,
            utf8: Vec::with_capacity(4),
            unknown: 0,
        }
    }

    /// Cursor position as `(x, y)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Character at `(x, y)` with row 0 at the top.
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Text of one row.
    pub fn row_text(&self, y: usize) -> Option<String> {
        if y < self.height {
            let start = y * self.width;
            Some(self.cells[start..start + self.width].iter().collect())
        } else {
            None
        }
    }

    /// Decode the braille grid back into cell values, top row first.
    ///
    /// Non-braille cells decode as `None`.
    pub fn braille_values(&self) -> Vec<Option<u8>> {
        self.cells.iter().map(|&c| DotTable::value_of(c)).collect()
    }

    /// Count of bytes or sequences the model ignored.
    pub fn unknown_sequences(&self) -> usize {
        self.unknown
    }

    /// Feed raw output bytes.
    pub fn process(&mut self, bytes: &[u8]) {
        for &b in bytes {
            match self.parse_state {
                ParseState::Ground => self.ground(b),
                ParseState::Escape => self.escape(b),
                ParseState::Csi => self.csi(b),
            }
        }
    }

    fn ground(&mut self, b: u8) {
        if !self.utf8.is_empty() || b >= 0x80 {
            self.utf8.push(b);
            match std::str::from_utf8(&self.utf8) {
                Ok(s) => {
                    let ch = s.chars().next().unwrap_or('\u{FFFD}');
                    self.utf8.clear();
                    self.put_char(ch);
                }
                Err(e) if e.error_len().is_some() => {
                    self.utf8.clear();
                    self.unknown += 1;
                }
                Err(_) => {}
            }
            return;
        }
        match b {
            0x1B => self.parse_state = ParseState::Escape,
            b'\r' => {
                self.cursor_x = 0;
                self.pending_wrap = false;
            }
            b'\n' => {
                self.cursor_y = (self.cursor_y + 1).min(self.height.saturating_sub(1));
                self.pending_wrap = false;
            }
            0x00..=0x1F | 0x7F => self.unknown += 1,
            _ => self.put_char(b as char),
        }
    }

    fn escape(&mut self, b: u8) {
        if b == b'[' {
            self.csi_params.clear();
            self.csi_private = false;
            self.parse_state = ParseState::Csi;
        } else {
            self.unknown += 1;
            self.parse_state = ParseState::Ground;
        }
    }

    fn csi(&mut self, b: u8) {
        match b {
            b'?' if self.csi_params.is_empty() => self.csi_private = true,
            b'0'..=b'9' => {
                if self.csi_params.is_empty() {
                    self.csi_params.push(0);
                }
                if let Some(last) = self.csi_params.last_mut() {
                    *last = last.saturating_mul(10).saturating_add(u32::from(b - b'0'));
                }
            }
            b';' => {
                if self.csi_params.is_empty() {
                    self.csi_params.push(0);
                }
                self.csi_params.push(0);
            }
            0x40..=0x7E => {
                self.dispatch_csi(b);
                self.parse_state = ParseState::Ground;
            }
            _ => {
                self.unknown += 1;
                self.parse_state = ParseState::Ground;
            }
        }
    }

    fn dispatch_csi(&mut self, final_byte: u8) {
        let param = |i: usize| self.csi_params.get(i).copied().unwrap_or(0);
        match (self.csi_private, final_byte) {
            (true, b'h') if param(0) == 25 => self.cursor_visible = true,
            (true, b'l') if param(0) == 25 => self.cursor_visible = false,
            (false, b'H') => {
                let row = param(0).max(1) as usize - 1;
                let col = param(1).max(1) as usize - 1;
                self.cursor_y = row.min(self.height.saturating_sub(1));
                self.cursor_x = col.min(self.width.saturating_sub(1));
                self.pending_wrap = false;
            }
            (false, b'J') if param(0) == 2 => self.cells.fill(' '),
            _ => self.unknown += 1,
        }
    }

    fn put_char(&mut self, ch: char) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        if self.pending_wrap {
            self.pending_wrap = false;
            self.cursor_x = 0;
            if self.cursor_y + 1 >= self.height {
                // No scrollback: drop output past the last line.
                self.cursor_y = self.height;
            } else {
                self.cursor_y += 1;
            }
        }
        if self.cursor_y >= self.height {
            return;
        }
        self.cells[self.cursor_y * self.width + self.cursor_x] = ch;
        if self.cursor_x + 1 >= self.width {
            self.pending_wrap = true;
        } else {
            self.cursor_x += 1;
        }
    }
}
