#![no_main]

use brl_render::draw::Draw;
use brl_render::surface::Surface;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(bitmap) = brl_bmp::decode(data) else {
        return;
    };

    assert_eq!(
        bitmap.as_bytes().len(),
        bitmap.width() as usize * bitmap.height() as usize
    );
    assert!(bitmap.as_bytes().iter().all(|&v| v <= 1), "non-binary mask");

    // Blitting anywhere must clip rather than panic.
    let mut surface = Surface::new(8, 4);
    surface.draw_bitmap(&bitmap, 3, -2);
    assert_eq!(surface.len(), 32);
});
