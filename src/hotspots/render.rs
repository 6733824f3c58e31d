//! Blending of the heat image over the source image.
use image::{Rgb, RgbImage};

/// Opacity of the source image in the overlay.
pub const OVERLAY_IMAGE_WEIGHT: f32 = 0.75;
/// Opacity of the heat image in the overlay.
pub const OVERLAY_HEAT_WEIGHT: f32 = 0.35;

/// `0.75·image + 0.35·heat`, rounded and saturated per channel.
///
/// The weights add up to 1.1, so the overlay is slightly brighter than a
/// plain alpha composite.
pub fn blend_overlay(image: &RgbImage, heat: &RgbImage) -> RgbImage {
    debug_assert_eq!(image.dimensions(), heat.dimensions());
    let (w, h) = image.dimensions();
    RgbImage::from_fn(w, h, |x, y| {
        let a = image.get_pixel(x, y);
        let b = heat.get_pixel(x, y);
        let mix = |i: usize| -> u8 {
            let v = OVERLAY_IMAGE_WEIGHT * a[i] as f32 + OVERLAY_HEAT_WEIGHT * b[i] as f32;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb([mix(0), mix(1), mix(2)])
    })
}
