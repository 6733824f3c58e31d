//! Knobs for the hotspot fuser.
//!
//! Signal and output toggles plus the two neighbourhood sizes are
//! configurable. Fusion weights, the percentile band and overlay opacities
//! are fixed constants of the method.
use crate::error::{InspectError, Result};
use serde::{Deserialize, Serialize};

/// Which signal maps take part in the fusion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalToggles {
    pub edge: bool,
    pub variance: bool,
    pub high_frequency: bool,
}

impl Default for SignalToggles {
    fn default() -> Self {
        Self {
            edge: true,
            variance: true,
            high_frequency: true,
        }
    }
}

/// Which artifacts `HotspotFuser::run` writes to disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputToggles {
    pub save_heat: bool,
    pub save_overlay: bool,
}

impl Default for OutputToggles {
    fn default() -> Self {
        Self {
            save_heat: true,
            save_overlay: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotOptions {
    pub signals: SignalToggles,
    pub outputs: OutputToggles,
    /// Side of the square local-variance window (pixels).
    pub variance_window: usize,
    /// Gaussian σ of the smoothing subtracted for the high-frequency residual.
    pub blur_sigma: f32,
    /// Compute the enabled signals concurrently.
    pub parallel: bool,
}

impl Default for HotspotOptions {
    fn default() -> Self {
        Self {
            signals: SignalToggles::default(),
            outputs: OutputToggles::default(),
            variance_window: 9,
            blur_sigma: 2.0,
            parallel: true,
        }
    }
}

impl HotspotOptions {
    pub fn with_signals(mut self, signals: SignalToggles) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_outputs(mut self, outputs: OutputToggles) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.variance_window == 0 {
            return Err(InspectError::InvalidOptions(
                "variance_window must be at least 1".to_string(),
            ));
        }
        if !(self.blur_sigma.is_finite() && self.blur_sigma > 0.0) {
            return Err(InspectError::InvalidOptions(format!(
                "blur_sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        Ok(())
    }
}
