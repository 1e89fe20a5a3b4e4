#![no_main]

use arbitrary::Arbitrary;
use brl_render::draw::{Draw, RectMode};
use brl_render::presenter::{Presenter, frame_len};
use brl_render::surface::Surface;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Plot { x: f32, y: f32, on: bool },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Curve { x_start: f32, x_end: f32, a: f32, b: f32, c: f32 },
    Rect { x: i32, y: i32, w: i32, h: i32, outline: bool },
    Clear,
}

#[derive(Arbitrary, Debug)]
struct Input {
    cols: u8,
    rows: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let cols = u16::from(input.cols % 40) + 1;
    let rows = u16::from(input.rows % 20) + 1;
    let mut surface = Surface::new(cols, rows);

    for op in input.ops.into_iter().take(16) {
        match op {
            Op::Plot { x, y, on } => {
                let _ = surface.plot(x, y, on);
            }
            Op::Line { x1, y1, x2, y2 } => surface.draw_line(x1, y1, x2, y2),
            Op::Curve { x_start, x_end, a, b, c } => surface.draw_curve(x_start, x_end, a, b, c),
            Op::Rect { x, y, w, h, outline } => {
                let mode = if outline { RectMode::Outline } else { RectMode::Filled };
                surface.draw_rect(x, y, w, h, mode);
            }
            Op::Clear => surface.clear(),
        }
    }

    assert_eq!(surface.len(), usize::from(cols) * usize::from(rows));
    let mut presenter = Presenter::new(Vec::new());
    let frame = presenter.encode(&surface);
    assert_eq!(frame.len(), frame_len(surface.len()));
    assert!(std::str::from_utf8(frame).is_ok(), "frame is not UTF-8");
});
