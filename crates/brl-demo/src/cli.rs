use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "brl-demo",
    about = "Animated curves, shapes and a sprite drawn with braille dots",
    version
)]
pub struct Cli {
    /// 24-bit raster drawn at (85, 0); white pixels are transparent.
    #[arg(long, value_name = "PATH")]
    pub bitmap: Option<PathBuf>,

    /// Stop after this many frames (0 runs until interrupted).
    #[arg(long, default_value_t = 0)]
    pub frames: u64,

    /// Delay between frames in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 20)]
    pub frame_ms: u64,

    /// Surface size in cells instead of the terminal size, e.g. `80x24`.
    #[arg(long, value_name = "COLSxROWS")]
    pub size: Option<CellSize>,
}

/// A `COLSxROWS` size override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub cols: u16,
    pub rows: u16,
}

impl FromStr for CellSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cols, rows) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected COLSxROWS, got {s:?}"))?;
        let cols: u16 = cols
            .trim()
            .parse()
            .map_err(|e| format!("bad column count {cols:?}: {e}"))?;
        let rows: u16 = rows
            .trim()
            .parse()
            .map_err(|e| format!("bad row count {rows:?}: {e}"))?;
        if cols == 0 || rows == 0 {
            return Err("size must be at least 1x1".to_string());
        }
        Ok(Self { cols, rows })
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}
