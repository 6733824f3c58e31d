//! Image gradients for the edge-energy signal.
//!
//! - 3×3 Sobel derivative pair with border clamping (replicate).
//! - Outputs per-pixel `gx`, `gy` and `mag = sqrt(gx² + gy²)`.

pub mod grad;

/// Per-pixel Sobel gradients with magnitude.
pub use grad::{sobel_gradients, Grad};
