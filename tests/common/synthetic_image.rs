use image::{GrayImage, Luma};
use std::path::Path;

/// Flat `background` image with a `side × side` square of `foreground`
/// whose top-left corner sits at `(origin, origin)`.
pub fn bright_square_u8(
    size: usize,
    origin: usize,
    side: usize,
    background: u8,
    foreground: u8,
) -> Vec<u8> {
    assert!(size > 0, "image dimensions must be positive");
    assert!(origin + side <= size, "square must fit inside the image");

    let mut img = vec![background; size * size];
    for y in origin..origin + side {
        for x in origin..origin + side {
            img[y * size + x] = foreground;
        }
    }
    img
}

/// Write a square grayscale buffer as PNG.
pub fn write_gray_png(path: &Path, size: usize, data: &[u8]) {
    let img = GrayImage::from_fn(size as u32, size as u32, |x, y| {
        Luma([data[y as usize * size + x as usize]])
    });
    img.save(path).expect("write synthetic png");
}

/// Chebyshev distance from `(x, y)` to the border ring of the square: 0 for
/// the pixels directly on either side of its edge.
pub fn distance_to_square_border(x: usize, y: usize, origin: usize, side: usize) -> usize {
    let (x, y) = (x as i64, y as i64);
    let lo = origin as i64;
    let hi = (origin + side) as i64 - 1;
    let inside = (lo..=hi).contains(&x) && (lo..=hi).contains(&y);
    if inside {
        let d = (x - lo).min(hi - x).min(y - lo).min(hi - y);
        return d as usize;
    }
    let dx = (lo - x).max(x - hi).max(0);
    let dy = (lo - y).max(y - hi).max(0);
    (dx.max(dy) - 1) as usize
}
