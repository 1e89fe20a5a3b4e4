#![forbid(unsafe_code)]

//! Terminal control sequences emitted around a rendered frame.
//!
//! | Sequence | Bytes |
//! |----------|-------|
//! | Hide cursor | `CSI ? 25 l` |
//! | Show cursor | `CSI ? 25 h` |
//! | Cursor home | `CSI H` |
//! | Clear screen | `CSI 2 J` |

/// Hide the text cursor (DECTCEM reset).
pub const HIDE_CURSOR: &[u8] = b"\x1b[?25l";

/// Show the text cursor (DECTCEM set).
pub const SHOW_CURSOR: &[u8] = b"\x1b[?25h";

/// Move the cursor to row 1, column 1.
pub const CURSOR_HOME: &[u8] = b"\x1b[H";

/// Erase the whole display.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";

/// Bytes to emit once on exit: clear the screen, then show the cursor again.
pub const TEARDOWN: &[u8] = b"\x1b[2J\x1b[?25h";

/// Fixed framing overhead of one encoded frame (hide + home + home).
pub const FRAME_OVERHEAD: usize = HIDE_CURSOR.len() + 2 * CURSOR_HOME.len();
