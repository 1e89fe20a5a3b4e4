#![forbid(unsafe_code)]
#![doc = "Terminal geometry and teardown for braille surfaces."]
#![doc = ""]
#![doc = "The render kernel never talks to the terminal. This crate is the thin"]
#![doc = "boundary that sizes a `Surface` from the controlling terminal once and"]
#![doc = "restores the screen on exit."]

use std::env;
use std::io::{self, Write};

use brl_render::ansi;
use brl_render::surface::Surface;

// ── Geometry ─────────────────────────────────────────────────────────────

/// Smallest size handed out, in cells.
pub const MIN_SIZE: u16 = 2;

/// Query the window size (columns, rows) of the controlling terminal.
///
/// Tries stdout, then stdin, then the `COLUMNS`/`LINES` environment
/// variables. Some terminals briefly report 1×1 on startup, so tiny sizes
/// defer to the environment and are otherwise raised to [`MIN_SIZE`].
///
/// # Errors
///
/// Returns an error if no terminal is attached and the environment does not
/// describe a size either.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let probed = probe_winsize();
    resolve_size(probed, size_from_env()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "no terminal attached and COLUMNS/LINES not set",
        )
    })
}

/// Allocate a zeroed surface covering the whole terminal.
///
/// # Errors
///
/// See [`terminal_size`].
pub fn surface_for_terminal() -> io::Result<Surface> {
    let (cols, rows) = terminal_size()?;
    #[cfg(feature = "tracing")]
    tracing::debug!(cols, rows, "surface sized from terminal");
    Ok(Surface::new(cols, rows))
}

/// Combine an ioctl result with the environment fallback.
pub fn resolve_size(probed: Option<(u16, u16)>, env: Option<(u16, u16)>) -> Option<(u16, u16)> {
    match (probed, env) {
        (Some((w, h)), _) if w >= MIN_SIZE && h >= MIN_SIZE => Some((w, h)),
        (_, Some(size)) => Some(size),
        (Some((w, h)), None) => Some((w.max(MIN_SIZE), h.max(MIN_SIZE))),
        (None, None) => None,
    }
}

/// Parse `COLUMNS` and `LINES`.
pub fn parse_env_size(cols: Option<&str>, rows: Option<&str>) -> Option<(u16, u16)> {
    let cols = cols?.trim().parse::<u16>().ok()?;
    let rows = rows?.trim().parse::<u16>().ok()?;
    if cols >= MIN_SIZE && rows >= MIN_SIZE {
        Some((cols, rows))
    } else {
        None
    }
}

fn size_from_env() -> Option<(u16, u16)> {
    let cols = env::var("COLUMNS").ok();
    let rows = env::var("LINES").ok();
    parse_env_size(cols.as_deref(), rows.as_deref())
}

#[cfg(unix)]
fn probe_winsize() -> Option<(u16, u16)> {
    use rustix::termios::tcgetwinsize;

    let stdout = io::stdout();
    let stdin = io::stdin();
    let ws = tcgetwinsize(&stdout).or_else(|_| tcgetwinsize(&stdin)).ok()?;
    Some((ws.ws_col, ws.ws_row))
}

#[cfg(not(unix))]
fn probe_winsize() -> Option<(u16, u16)> {
    None
}

// ── Teardown ─────────────────────────────────────────────────────────────

/// Emits [`ansi::TEARDOWN`] (clear screen, show cursor) when dropped.
///
/// Frames hide the cursor and leave the last image on screen; holding this
/// guard for the lifetime of the render loop puts the terminal back on every
/// exit path that unwinds.
pub struct TeardownGuard<W: Write> {
    writer: W,
    armed: bool,
}

impl<W: Write> TeardownGuard<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            armed: true,
        }
    }

    /// Write the teardown sequence now instead of on drop.
    ///
    /// # Errors
    ///
    /// Propagates write or flush failures.
    pub fn finish(mut self) -> io::Result<()> {
        self.armed = false;
        emit_teardown(&mut self.writer)
    }

    /// Skip teardown entirely.
    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<W: Write> Drop for TeardownGuard<W> {
    fn drop(&mut self) {
        if self.armed {
            // Best effort: nothing useful to do with a failure here.
            let _ = emit_teardown(&mut self.writer);
        }
    }
}

fn emit_teardown<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(ansi::TEARDOWN)?;
    writer.flush()?;
    #[cfg(feature = "tracing")]
    tracing::debug!("terminal teardown emitted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn probed_size_wins() {
        assert_eq!(resolve_size(Some((120, 40)), Some((80, 24))), Some((120, 40)));
    }

    #[test]
    fn tiny_probe_defers_to_env() {
        assert_eq!(resolve_size(Some((1, 1)), Some((80, 24))), Some((80, 24)));
    }

    #[test]
    fn tiny_probe_without_env_is_clamped() {
        assert_eq!(resolve_size(Some((0, 1)), None), Some((2, 2)));
    }

    #[test]
    fn nothing_known() {
        assert_eq!(resolve_size(None, None), None);
        assert_eq!(resolve_size(None, Some((100, 30))), Some((100, 30)));
    }

    #[test]
    fn env_parsing() {
        assert_eq!(parse_env_size(Some("132"), Some(" 43 ")), Some((132, 43)));
        assert_eq!(parse_env_size(Some("1"), Some("43")), None);
        assert_eq!(parse_env_size(Some("wide"), Some("43")), None);
        assert_eq!(parse_env_size(None, Some("43")), None);
        assert_eq!(parse_env_size(Some("70000"), Some("43")), None);
    }

    #[test]
    fn guard_emits_on_drop() {
        let buf = SharedBuf::default();
        {
            let _guard = TeardownGuard::new(buf.clone());
        }
        assert_eq!(buf.0.borrow().as_slice(), ansi::TEARDOWN);
    }

    #[test]
    fn finish_emits_once() {
        let buf = SharedBuf::default();
        let guard = TeardownGuard::new(buf.clone());
        guard.finish().unwrap();
        assert_eq!(buf.0.borrow().as_slice(), ansi::TEARDOWN);
    }

    #[test]
    fn disarmed_guard_is_silent() {
        let buf = SharedBuf::default();
        {
            let mut guard = TeardownGuard::new(buf.clone());
            guard.disarm();
        }
        assert!(buf.0.borrow().is_empty());
    }
}
