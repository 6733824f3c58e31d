//! Percentile-based rescaling of signal maps to `[0, 1]`.
use crate::image::ImageF32;
use log::debug;

/// Lower percentile mapped to 0.
pub const LOW_PERCENTILE: f32 = 2.0;
/// Upper percentile mapped to 1.
pub const HIGH_PERCENTILE: f32 = 98.0;
/// Percentile bands narrower than this are treated as flat.
pub const NORMALIZE_EPS: f32 = 1e-6;

/// `p`-th percentile (`0..=100`) of already sorted values, linearly
/// interpolated between the neighbouring order statistics.
pub fn percentile_sorted(sorted: &[f32], p: f32) -> Option<f32> {
    if sorted.is_empty() {
        return None;
    }
    let pos = (p.clamp(0.0, 100.0) as f64 / 100.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = (pos - lo as f64) as f32;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// `p`-th percentile of unsorted values.
pub fn percentile(values: &[f32], p: f32) -> Option<f32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);
    percentile_sorted(&sorted, p)
}

/// The `(2nd, 98th)` percentile band of a map.
pub fn percentile_band(map: &ImageF32) -> Option<(f32, f32)> {
    let mut sorted = map.data.clone();
    sorted.sort_unstable_by(f32::total_cmp);
    Some((
        percentile_sorted(&sorted, LOW_PERCENTILE)?,
        percentile_sorted(&sorted, HIGH_PERCENTILE)?,
    ))
}

/// Rescale so the 2nd percentile maps to 0 and the 98th to 1, clipping
/// outside. A flat band (narrower than `NORMALIZE_EPS`) yields all zeros.
pub fn robust_normalize(map: &ImageF32) -> ImageF32 {
    let Some((lo, hi)) = percentile_band(map) else {
        return ImageF32::new(map.w, map.h);
    };
    let range = hi - lo;
    if !(range >= NORMALIZE_EPS) {
        debug!("flat signal band [{lo}, {hi}], emitting zero map");
        return ImageF32::new(map.w, map.h);
    }
    debug!("signal band [{lo:.3}, {hi:.3}]");
    let inv = 1.0 / range;
    map.map(|v| ((v - lo) * inv).clamp(0.0, 1.0))
}
