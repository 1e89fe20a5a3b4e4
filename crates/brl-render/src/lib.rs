#![forbid(unsafe_code)]

//! Render kernel: braille dot surfaces, rasterizers, and terminal encoding.
//!
//! # Role
//! `brl-render` turns geometric primitives into a grid of braille cells and
//! that grid into a single terminal byte stream. Each terminal cell holds one
//! Unicode braille glyph, so a cell doubles as a 2×4 block of dots.
//!
//! # Primary responsibilities
//! - **Surface**: flat cell buffer where every byte is eight independent dots.
//! - **Draw**: point plotter plus line, curve, rectangle and bitmap rasterizers.
//! - **Bitmap**: binary per-pixel mask that can be blitted onto a surface.
//! - **Presenter**: expands cells through the [`DotTable`] into UTF-8 output.
//!
//! # Coordinates
//! Pixel coordinates grow right (`x`) and UP (`y`): pixel `(0, 0)` is the
//! bottom-left dot of the bottom-left cell. The cell buffer itself is stored
//! top row first, which is the order a terminal paints it in.
//!
//! ```
//! use brl_render::draw::{Draw, RectMode};
//! use brl_render::presenter::Presenter;
//! use brl_render::surface::Surface;
//!
//! let mut surface = Surface::new(4, 2);
//! surface.draw_rect(0, 0, 8, 8, RectMode::Outline);
//! surface.draw_line(0.0, 0.0, 7.0, 7.0);
//!
//! let mut presenter = Presenter::new(Vec::new());
//! let frame = presenter.encode(&surface);
//! assert_eq!(frame.len(), 3 * 4 * 2 + 12);
//! ```

pub mod ansi;
pub mod bitmap;
pub mod dot_table;
pub mod draw;
pub mod presenter;
pub mod surface;
pub mod terminal_model;

pub use bitmap::Bitmap;
pub use dot_table::DotTable;
pub use draw::{Draw, OutOfBounds, RectMode};
pub use presenter::Presenter;
pub use surface::Surface;
