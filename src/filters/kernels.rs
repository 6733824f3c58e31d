use super::SeparableFilter;
use crate::error::{InspectError, Result};

/// Owned 1-D kernel with an explicit anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D {
    taps: Vec<f32>,
    anchor: usize,
}

impl Kernel1D {
    /// Sampled Gaussian with radius `round(3σ)` (13 taps at σ = 2),
    /// normalized to unit sum.
    pub fn gaussian(sigma: f32) -> Result<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(InspectError::InvalidOptions(format!(
                "gaussian sigma must be positive, got {sigma}"
            )));
        }
        let radius = (3.0 * sigma).round().max(1.0) as usize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (0..=2 * radius)
            .map(|i| {
                let d = i as f32 - radius as f32;
                (-(d * d) / denom).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Ok(Self {
            taps,
            anchor: radius,
        })
    }

    /// `k` unit taps (a running window sum). Even sizes anchor at `k / 2`.
    ///
    /// Sums of integer-valued samples stay exact in f32 while below 2²⁴,
    /// so callers divide once by the window area instead of using `1/k` taps.
    pub fn box_sum(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(InspectError::InvalidOptions(
                "box window must be at least 1 pixel".to_string(),
            ));
        }
        Ok(Self {
            taps: vec![1.0; k],
            anchor: k / 2,
        })
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

impl SeparableFilter for Kernel1D {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }

    #[inline]
    fn anchor(&self) -> usize {
        self.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_sigma_two_has_thirteen_normalized_taps() {
        let k = Kernel1D::gaussian(2.0).unwrap();
        assert_eq!(k.len(), 13);
        assert_eq!(k.anchor(), 6);
        let sum: f32 = k.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        // symmetric, peaked at the centre
        let taps = k.taps();
        for i in 0..6 {
            assert!((taps[i] - taps[12 - i]).abs() < 1e-7);
            assert!(taps[i] < taps[i + 1]);
        }
    }

    #[test]
    fn invalid_kernel_parameters_are_rejected() {
        assert!(Kernel1D::gaussian(0.0).is_err());
        assert!(Kernel1D::gaussian(f32::NAN).is_err());
        assert!(Kernel1D::box_sum(0).is_err());
    }
}
