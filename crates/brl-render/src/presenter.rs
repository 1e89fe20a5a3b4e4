#![forbid(unsafe_code)]

//! Presenter: surface to terminal byte stream.
//!
//! Every frame is a full repaint with a fixed layout:
//!
//! ```text
//! CSI ?25l  CSI H  glyph(cell 0) glyph(cell 1) ... glyph(cell n-1)  CSI H
//! ```
//!
//! Cells are emitted in buffer order (top row first) and the terminal's
//! auto-wrap moves each row onto the next line, so no cursor addressing is
//! needed between rows.
//!
//! # Design Principles
//!
//! - **Owned state**: the [`DotTable`] and the frame buffer belong to the
//!   presenter; there are no process globals.
//! - **No per-frame allocation**: the frame buffer is allocated on first use
//!   and reused afterward.
//! - **Single write**: each frame reaches the writer in one `write_all`.
//!
//! # Usage
//!
//! ```
//! use brl_render::draw::Draw;
//! use brl_render::presenter::Presenter;
//! use brl_render::surface::Surface;
//!
//! let mut surface = Surface::new(2, 1);
//! surface.plot(0.0, 0.0, true)?;
//!
//! let mut presenter = Presenter::new(Vec::new());
//! let stats = presenter.present(&surface)?;
//! assert_eq!(stats.bytes, 18);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Write};

use crate::ansi;
use crate::dot_table::{DotTable, GLYPH_LEN};
use crate::surface::Surface;

/// Exact encoded size of a frame with `cells` cells.
#[inline]
pub const fn frame_len(cells: usize) -> usize {
    ansi::HIDE_CURSOR.len() + ansi::CURSOR_HOME.len() + GLYPH_LEN * cells + ansi::CURSOR_HOME.len()
}

/// Per-frame output statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentStats {
    /// Cells encoded.
    pub cells: usize,
    /// Bytes handed to the writer.
    pub bytes: usize,
}

/// Full-frame braille presenter.
pub struct Presenter<W: Write> {
    writer: W,
    table: DotTable,
    /// Reused frame buffer; empty until the first frame.
    frame: Vec<u8>,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter that writes frames to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            table: DotTable::new(),
            frame: Vec::new(),
        }
    }

    /// The glyph table used for encoding.
    #[inline]
    pub fn table(&self) -> &DotTable {
        &self.table
    }

    /// Encode a surface into the internal frame buffer and return it.
    pub fn encode(&mut self, surface: &Surface) -> &[u8] {
        let len = frame_len(surface.len());
        self.frame.clear();
        self.frame.reserve_exact(len);

        self.frame.extend_from_slice(ansi::HIDE_CURSOR);
        self.frame.extend_from_slice(ansi::CURSOR_HOME);
        for &cell in surface.cells() {
            self.frame.extend_from_slice(self.table.glyph(cell));
        }
        self.frame.extend_from_slice(ansi::CURSOR_HOME);

        debug_assert_eq!(self.frame.len(), len);
        &self.frame
    }

    /// Encode a surface and write the whole frame, then flush.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn present(&mut self, surface: &Surface) -> io::Result<PresentStats> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "present",
            width = surface.width(),
            height = surface.height()
        )
        .entered();

        self.encode(surface);
        self.writer.write_all(&self.frame)?;
        self.writer.flush()?;

        let stats = PresentStats {
            cells: surface.len(),
            bytes: self.frame.len(),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(cells = stats.cells, bytes = stats.bytes, "frame presented");

        Ok(stats)
    }

    /// Borrow the underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the presenter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Draw, RectMode};
    use crate::terminal_model::TerminalModel;

    const BLANK: &[u8] = "\u{2800}".as_bytes();

    #[test]
    fn blank_two_by_two_frame() {
        let surface = Surface::new(2, 2);
        let mut presenter = Presenter::new(Vec::new());
        let frame = presenter.encode(&surface).to_vec();

        let mut expected = Vec::new();
        expected.extend_from_slice(b"\x1b[?25l");
        expected.extend_from_slice(b"\x1b[H");
        for _ in 0..4 {
            expected.extend_from_slice(BLANK);
        }
        expected.extend_from_slice(b"\x1b[H");
        assert_eq!(frame, expected);
    }

    #[test]
    fn frame_length_formula() {
        assert_eq!(frame_len(0), 12);
        assert_eq!(frame_len(80 * 24), 6 + 3 + 3 * 80 * 24 + 3);
        let surface = Surface::new(7, 3);
        let mut presenter = Presenter::new(io::sink());
        assert_eq!(presenter.encode(&surface).len(), frame_len(21));
    }

    #[test]
    fn present_writes_exactly_the_encoded_frame() {
        let mut surface = Surface::new(3, 2);
        surface.draw_rect(0, 0, 6, 8, RectMode::Outline);

        let mut presenter = Presenter::new(Vec::new());
        let expected = presenter.encode(&surface).to_vec();
        let stats = presenter.present(&surface).unwrap();

        assert_eq!(stats, PresentStats { cells: 6, bytes: expected.len() });
        assert_eq!(presenter.writer(), &expected);
    }

    #[test]
    fn frame_buffer_is_reused() {
        let surface = Surface::new(10, 10);
        let mut presenter = Presenter::new(io::sink());
        let first = presenter.encode(&surface).as_ptr();
        let second = presenter.encode(&surface).as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn resized_surface_reencodes_at_new_size() {
        let mut surface = Surface::new(4, 4);
        let mut presenter = Presenter::new(io::sink());
        assert_eq!(presenter.encode(&surface).len(), frame_len(16));
        surface.resize(2, 1);
        assert_eq!(presenter.encode(&surface).len(), frame_len(2));
    }

    #[test]
    fn bottom_left_dot_lands_on_last_row() {
        let mut surface = Surface::new(3, 2);
        surface.plot(0.0, 0.0, true).unwrap();

        let mut presenter = Presenter::new(Vec::new());
        presenter.present(&surface).unwrap();

        let mut model = TerminalModel::new(3, 2);
        model.process(&presenter.into_inner());
        assert_eq!(model.cell(0, 1), Some('\u{2840}'));
        assert_eq!(model.cell(0, 0), Some('\u{2800}'));
        assert!(!model.cursor_visible());
        assert_eq!(model.cursor(), (0, 0));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_propagate() {
        let surface = Surface::new(1, 1);
        let mut presenter = Presenter::new(FailingWriter);
        let err = presenter.present(&surface).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
