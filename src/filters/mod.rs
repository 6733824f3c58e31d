//! Separable 1-D filtering on `ImageF32` with replicate borders.
//!
//! A filter is described by its taps and an anchor (the tap aligned with the
//! output pixel). `apply_separable` runs the horizontal pass into a scratch
//! plane, then the vertical pass, so an `n`-tap kernel costs `2n` MACs per
//! pixel instead of `n²`.
//!
//! Provided kernels:
//! - `Kernel1D::gaussian(sigma)`: sampled Gaussian, radius `round(3σ)`,
//!   normalized to sum 1.
//! - `Kernel1D::box_sum(k)`: `k` unit taps (window sum).

pub mod kernels;

pub use kernels::Kernel1D;

use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order).
    fn taps(&self) -> &[f32];

    /// Index of the tap aligned with the output sample.
    fn anchor(&self) -> usize {
        self.taps().len() / 2
    }
}

/// Convolve `src` with `filter` along both axes. Out-of-range samples
/// replicate the nearest border pixel.
pub fn apply_separable<F: SeparableFilter + ?Sized>(filter: &F, src: &ImageF32) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let taps = filter.taps();
    if taps.is_empty() {
        return src.clone();
    }
    let anchor = filter.anchor() as isize;

    // horizontal
    for y in 0..h {
        filter_row(src.row(y), tmp.row_mut(y), taps, anchor);
    }

    // vertical
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - anchor, h);
            let src_row = tmp.row(sy);
            for (dst_px, &v) in dst_row.iter_mut().zip(src_row) {
                *dst_px += tap * v;
            }
        }
    }
    out
}

fn filter_row(row: &[f32], out: &mut [f32], taps: &[f32], anchor: isize) {
    let len = row.len();
    for (x, dst_px) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let idx = clamp_index(x as isize + k as isize - anchor, len);
            acc += tap * row[idx];
        }
        *dst_px = acc;
    }
}

#[inline]
pub(crate) fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
