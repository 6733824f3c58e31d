//! Per-pixel anomaly signals on a grayscale plane (raw 0..255 intensities).
//!
//! - edge energy: Sobel gradient magnitude
//! - local variance: `E[x²] − E[x]²` over a `k × k` box, clamped at 0
//! - high-frequency residual: `|gray − gaussian(gray, σ)|`
use crate::edges::sobel_gradients;
use crate::error::Result;
use crate::filters::{apply_separable, Kernel1D};
use crate::image::ImageF32;

/// Sobel gradient magnitude.
pub fn edge_energy(gray: &ImageF32) -> ImageF32 {
    sobel_gradients(gray).mag
}

/// Local variance over a `window × window` neighbourhood.
///
/// Window sums are divided by the area once, which keeps uniform 8-bit
/// regions at exactly zero variance.
pub fn local_variance(gray: &ImageF32, window: usize) -> Result<ImageF32> {
    let kernel = Kernel1D::box_sum(window)?;
    let area = (window * window) as f32;
    let sum = apply_separable(&kernel, gray);
    let sum_sq = apply_separable(&kernel, &gray.map(|v| v * v));
    let mut var = sum_sq;
    for (v, &s) in var.data.iter_mut().zip(&sum.data) {
        let mean = s / area;
        *v = (*v / area - mean * mean).max(0.0);
    }
    Ok(var)
}

/// Absolute difference between the image and its Gaussian-smoothed copy.
///
/// The input is an 8-bit image, so the smoothed plane is rounded to 8-bit
/// levels before differencing.
pub fn high_frequency_residual(gray: &ImageF32, sigma: f32) -> Result<ImageF32> {
    let kernel = Kernel1D::gaussian(sigma)?;
    let mut residual = apply_separable(&kernel, gray);
    for (v, &g) in residual.data.iter_mut().zip(&gray.data) {
        let smooth = v.round().clamp(0.0, 255.0);
        *v = (g - smooth).abs();
    }
    Ok(residual)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_image(size: usize, lo: usize, hi: usize) -> ImageF32 {
        let mut img = ImageF32::filled(size, size, 50.0);
        for y in lo..hi {
            for x in lo..hi {
                img.set(x, y, 200.0);
            }
        }
        img
    }

    #[test]
    fn flat_image_has_no_signal() {
        let img = ImageF32::filled(16, 12, 80.0);
        assert!(edge_energy(&img).data.iter().all(|&v| v == 0.0));
        assert!(local_variance(&img, 9).unwrap().data.iter().all(|&v| v == 0.0));
        assert!(high_frequency_residual(&img, 2.0)
            .unwrap()
            .data
            .iter()
            .all(|&v| v == 0.0));
    }

    #[test]
    fn variance_is_never_negative() {
        // Large values make E[x²] − E[x]² prone to cancellation.
        let mut img = ImageF32::filled(12, 12, 255.0);
        img.set(6, 6, 254.0);
        let var = local_variance(&img, 9).unwrap();
        assert!(var.data.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn variance_peaks_at_square_border() {
        let img = square_image(40, 10, 30);
        let var = local_variance(&img, 9).unwrap();
        // On the border the window is half inside, half outside.
        assert!(var.get(10, 20) > var.get(20, 20));
        assert!(var.get(10, 20) > var.get(3, 20));
        assert_eq!(var.get(20, 20), 0.0);
        assert_eq!(var.get(0, 20), 0.0);
    }

    #[test]
    fn residual_vanishes_far_from_edges() {
        let img = square_image(40, 10, 30);
        let hf = high_frequency_residual(&img, 2.0).unwrap();
        assert_eq!(hf.get(20, 20), 0.0);
        assert_eq!(hf.get(0, 0), 0.0);
        assert!(hf.get(10, 20) > 0.0);
        assert!(hf.get(9, 20) > 0.0);
    }

    #[test]
    fn invalid_parameters_propagate() {
        let img = ImageF32::filled(4, 4, 1.0);
        assert!(local_variance(&img, 0).is_err());
        assert!(high_frequency_residual(&img, -1.0).is_err());
    }
}
