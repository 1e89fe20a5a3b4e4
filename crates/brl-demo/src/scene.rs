//! The animated demo scene: two parabolas breathing in opposite directions,
//! an optional sprite, three squares and two lines.

use brl_render::Bitmap;
use brl_render::draw::{Draw, RectMode};
use brl_render::surface::Surface;

const CURVE_X_END: f32 = 80.0;
const CURVE_B: f32 = 10.0;
const UPPER_C: f32 = 87.0;
const LOWER_C: f32 = 1000.0;
const SPRITE_AT: (i32, i32) = (85, 0);
const SQUARES: [(i32, i32); 3] = [(200, 100), (250, 50), (300, 10)];
const SQUARE_SIDE: i32 = 20;
const LINE_FROM: (f32, f32) = (200.0, 150.0);
const LINE_TO: [(f32, f32); 2] = [(280.0, 150.0), (280.0, 100.0)];

/// Peak magnitude of the curve coefficient before it swings back.
pub const SWING: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Scene {
    a: f32,
    delta: f32,
    sprite: Option<Bitmap>,
}

impl Scene {
    pub fn new(sprite: Option<Bitmap>) -> Self {
        Self {
            a: 0.1,
            delta: 0.01,
            sprite,
        }
    }

    /// Current quadratic coefficient.
    pub fn coefficient(&self) -> f32 {
        self.a
    }

    /// Clear `surface` and draw the current frame onto it.
    pub fn render(&self, surface: &mut Surface) {
        surface.clear();
        surface.draw_curve(0.0, CURVE_X_END, self.a, CURVE_B, UPPER_C);
        surface.draw_curve(0.0, CURVE_X_END, -self.a, CURVE_B, LOWER_C);
        if let Some(sprite) = &self.sprite {
            surface.draw_bitmap(sprite, SPRITE_AT.0, SPRITE_AT.1);
        }
        for (x, y) in SQUARES {
            surface.draw_rect(x, y, SQUARE_SIDE, SQUARE_SIDE, RectMode::Filled);
        }
        for (x, y) in LINE_TO {
            surface.draw_line(LINE_FROM.0, LINE_FROM.1, x, y);
        }
    }

    /// Advance the animation by one frame.
    pub fn step(&mut self) {
        self.a += self.delta;
        if self.a.abs() > SWING {
            self.delta = -self.delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_and_lines_are_drawn() {
        let mut surface = Surface::new(200, 60);
        Scene::new(None).render(&mut surface);
        for (x, y) in SQUARES {
            let (x, y) = (x as u32, y as u32);
            assert_eq!(surface.dot(x, y), Some(true));
            assert_eq!(surface.dot(x + 10, y + 10), Some(true));
        }
        assert_eq!(surface.dot(240, 150), Some(true));
        assert_eq!(surface.dot(200, 150), Some(true));
    }

    #[test]
    fn render_clears_previous_frame() {
        let mut surface = Surface::new(200, 60);
        surface.plot(399.0, 239.0, true).unwrap();
        Scene::new(None).render(&mut surface);
        assert_eq!(surface.dot(399, 239), Some(false));
    }

    #[test]
    fn sprite_is_placed() {
        let sprite = Bitmap::from_mask(1, 1, vec![1]).unwrap();
        let mut surface = Surface::new(200, 60);
        Scene::new(Some(sprite)).render(&mut surface);
        assert_eq!(surface.dot(85, 0), Some(true));

        let mut bare = Surface::new(200, 60);
        Scene::new(None).render(&mut bare);
        assert_eq!(bare.dot(85, 0), Some(false));
    }

    #[test]
    fn small_surface_clips_without_panicking() {
        let mut surface = Surface::new(4, 2);
        Scene::new(None).render(&mut surface);
        assert!(surface.count_dots() <= 8 * 8);
    }

    #[test]
    fn coefficient_swings_back_and_forth() {
        let mut scene = Scene::new(None);
        let mut saw_negative = false;
        for _ in 0..1000 {
            scene.step();
            assert!(scene.coefficient().abs() <= SWING + 0.02);
            saw_negative |= scene.coefficient() < 0.0;
        }
        assert!(saw_negative);
    }
}
