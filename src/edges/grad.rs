//! Sobel gradients with magnitude.
//!
//! The 3×3 kernels are the outer product of a `[1, 2, 1]` smoothing tap and a
//! `[-1, 0, 1]` central difference, so each axis sees a first derivative
//! across the other axis' smoothing. Borders replicate.
//!
//! Complexity: O(W·H); memory: three float buffers.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative, positive where intensity rises to the right
    pub gx: ImageF32,
    /// Vertical derivative, positive where intensity rises downwards
    pub gy: ImageF32,
    /// `sqrt(gx² + gy²)`
    pub mag: ImageF32,
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(img: &ImageF32) -> Grad {
    let (w, h) = (img.w, img.h);
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let up = img.row(y.saturating_sub(1));
        let mid = img.row(y);
        let down = img.row((y + 1).min(h - 1));
        let (row_gx, row_gy, row_mag) = (gx.row_mut(y), gy.row_mut(y), mag.row_mut(y));
        for x in 0..w {
            let l = x.saturating_sub(1);
            let r = (x + 1).min(w - 1);
            // [-1, 0, 1] across, [1, 2, 1] along the other axis.
            let dx = (up[r] - up[l]) + 2.0 * (mid[r] - mid[l]) + (down[r] - down[l]);
            let dy = (down[l] + 2.0 * down[x] + down[r]) - (up[l] + 2.0 * up[x] + up[r]);
            row_gx[x] = dx;
            row_gy[x] = dy;
            row_mag[x] = (dx * dx + dy * dy).sqrt();
        }
    }

    Grad { gx, gy, mag }
}
