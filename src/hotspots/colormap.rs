//! Turbo false-color palette and heat-to-RGB conversion.
//!
//! Uses the polynomial fit of the Turbo colormap (blue → cyan → green →
//! yellow → red), evaluated once into a 256-entry lookup table.
use crate::image::{ImageF32, ImageView};
use image::{Rgb, RgbImage};

const RED: ([f32; 4], [f32; 2]) = (
    [0.135_721_38, 4.615_392_6, -42.660_322, 132.131_08],
    [-152.942_39, 59.286_38],
);
const GREEN: ([f32; 4], [f32; 2]) = (
    [0.091_402_61, 2.194_188_4, 4.842_966_6, -14.185_033],
    [4.277_298_7, 2.829_566],
);
const BLUE: ([f32; 4], [f32; 2]) = (
    [0.106_673_3, 12.641_946, -60.582_05, 110.362_77],
    [-89.903_11, 27.348_25],
);

fn channel(coeffs: &([f32; 4], [f32; 2]), x: f32) -> u8 {
    let (c4, c2) = coeffs;
    let x2 = x * x;
    let x3 = x2 * x;
    let x4 = x2 * x2;
    let x5 = x4 * x;
    let v = c4[0] + c4[1] * x + c4[2] * x2 + c4[3] * x3 + c2[0] * x4 + c2[1] * x5;
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Turbo color for `t` in `[0, 1]`; values outside are clamped.
pub fn turbo(t: f32) -> Rgb<u8> {
    let x = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Rgb([channel(&RED, x), channel(&GREEN, x), channel(&BLUE, x)])
}

/// Palette indexed by 8-bit level.
pub fn turbo_lut() -> [Rgb<u8>; 256] {
    let mut lut = [Rgb([0u8; 3]); 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = turbo(i as f32 / 255.0);
    }
    lut
}

/// Map a `[0, 1]` heat plane to 8 bits (truncating `v · 255`) and color it.
pub fn colorize(heat: &ImageF32) -> RgbImage {
    let lut = turbo_lut();
    let mut out = RgbImage::new(heat.w as u32, heat.h as u32);
    for y in 0..heat.h {
        for (x, &v) in heat.row(y).iter().enumerate() {
            // `as u8` saturates and maps NaN to 0.
            let level = (v * 255.0) as u8;
            out.put_pixel(x as u32, y as u32, lut[level as usize]);
        }
    }
    out
}
