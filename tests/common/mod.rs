#![allow(dead_code)]

use photo_edit_engine::ImageBuffer;

/// Deterministic image with every channel varying across the frame
pub fn gradient(width: u32, height: u32) -> ImageBuffer {
    let mut img = ImageBuffer::filled(width, height, [0, 0, 0]).unwrap();
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x * 7 + y * 13) % 256) as u8;
            img.set_pixel(x, y, [r, g, b]);
        }
    }
    img
}

/// PNG encoding of `img`
pub fn png_bytes(img: &ImageBuffer) -> Vec<u8> {
    let mut out = Vec::new();
    img.as_rgb()
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}
