//! Defect-likelihood heatmaps from local visual-anomaly signals.
//!
//! Pipeline for one image:
//!
//! 1. Grayscale plane (raw 0..255 intensities).
//! 2. Enabled signals, each robustly normalized to `[0, 1]` using its 2nd/98th
//!    percentile band:
//!    - edge energy (Sobel magnitude),
//!    - local variance over a `k × k` window (default 9),
//!    - high-frequency residual against a Gaussian blur (σ = 2).
//! 3. Fusion `0.4·edge + 0.3·variance + 0.3·high_frequency` with absolute
//!    weights; disabled signals simply drop out.
//! 4. Turbo false-color heat image and a `0.75·image + 0.35·heat` overlay.
//!
//! The signals have no data dependency on each other and may be computed
//! concurrently; fusion waits for all of them. The fuser holds no mutable
//! state, so one instance can serve many images in parallel.

pub mod colormap;
pub mod fuse;
pub mod normalize;
pub mod options;
pub mod render;
pub mod signals;

pub use colormap::{colorize, turbo};
pub use fuse::{fuse, SignalMaps, EDGE_WEIGHT, HIGH_FREQUENCY_WEIGHT, VARIANCE_WEIGHT};
pub use normalize::{percentile, robust_normalize};
pub use options::{HotspotOptions, OutputToggles, SignalToggles};
pub use render::blend_overlay;
pub use signals::{edge_energy, high_frequency_residual, local_variance};

use crate::artifacts::{ArtifactNamer, HOTSPOTS_HEAT_SUFFIX, HOTSPOTS_OVERLAY_SUFFIX};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::TimingBreakdown;
use crate::error::{InspectError, Result};
use crate::image::io::{load_image, save_rgb_image};
use crate::image::{ImageF32, ImageU8, ImageView, LoadedImage};
use image::RgbImage;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Hottest pixel of a fused heatmap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Peak {
    pub x: usize,
    pub y: usize,
    pub value: f32,
}

/// Everything computed for one image.
#[derive(Clone, Debug)]
pub struct HotspotReport {
    /// Fused heat in `[0, 1]`, same size as the image.
    pub heatmap: ImageF32,
    /// Normalized maps of the enabled signals.
    pub signals: SignalMaps,
    /// False-color rendering of `heatmap`.
    pub heat_image: RgbImage,
    /// Heat image blended over the source image.
    pub overlay: RgbImage,
    pub peak: Peak,
    pub timing: TimingBreakdown,
}

/// Output locations of one `HotspotFuser::run` call. Both paths are always
/// reported; the flags say which files were actually written.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotArtifacts {
    pub heat_path: PathBuf,
    pub overlay_path: PathBuf,
    pub heat_written: bool,
    pub overlay_written: bool,
    pub peak: Peak,
}

#[derive(Clone, Debug, Default)]
pub struct HotspotFuser {
    options: HotspotOptions,
}

impl HotspotFuser {
    pub fn new(options: HotspotOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &HotspotOptions {
        &self.options
    }

    /// Enabled signal maps before normalization.
    pub fn raw_signals(&self, gray: &ImageF32) -> Result<SignalMaps> {
        self.extract(gray, false)
    }

    /// Enabled signal maps, each normalized to `[0, 1]`.
    pub fn normalized_signals(&self, gray: &ImageF32) -> Result<SignalMaps> {
        self.extract(gray, true)
    }

    /// Fused heatmap of an 8-bit grayscale view. Views whose buffer does not
    /// cover the declared layout are rejected.
    pub fn heatmap(&self, gray: &ImageU8<'_>) -> Result<ImageF32> {
        gray.check_layout()?;
        if gray.is_empty() {
            return Err(InspectError::EmptyImage {
                path: PathBuf::from("<buffer>"),
            });
        }
        let plane = ImageF32::from_gray(gray);
        let signals = self.normalized_signals(&plane)?;
        Ok(fuse(&signals, plane.w, plane.h))
    }

    /// Compute heatmap, false-color image and overlay for a decoded image.
    pub fn analyze(&self, image: &LoadedImage) -> Result<HotspotReport> {
        let start = Instant::now();
        let mut timing = TimingBreakdown::default();
        let view = image.gray.as_view();
        if view.is_empty() {
            return Err(InspectError::EmptyImage {
                path: image.source.clone(),
            });
        }

        let plane = timing.time("to_float", || ImageF32::from_gray(&view));
        let signals = timing.time("signals", || self.normalized_signals(&plane))?;
        let heatmap = timing.time("fuse", || fuse(&signals, plane.w, plane.h));
        let heat_image = timing.time("colorize", || colorize(&heatmap));
        let overlay = timing.time("overlay", || blend_overlay(&image.rgb, &heat_image));

        let peak = heatmap
            .argmax()
            .map(|(x, y, value)| Peak { x, y, value })
            .unwrap_or(Peak {
                x: 0,
                y: 0,
                value: 0.0,
            });
        timing.total_ms = elapsed_ms(start);
        debug!(
            "hotspots {}: {}×{} peak {:.3} at ({}, {}) in {:.2} ms",
            image.source.display(),
            plane.w,
            plane.h,
            peak.value,
            peak.x,
            peak.y,
            timing.total_ms
        );

        Ok(HotspotReport {
            heatmap,
            signals,
            heat_image,
            overlay,
            peak,
            timing,
        })
    }

    /// Load `image_path`, analyze it and write the enabled artifacts.
    pub fn run<N: ArtifactNamer + ?Sized>(
        &self,
        image_path: &Path,
        namer: &N,
    ) -> Result<HotspotArtifacts> {
        let image = load_image(image_path)?;
        let report = self.analyze(&image)?;
        self.save(image_path, &report, namer)
    }

    /// Persist the artifacts of an existing report according to the output
    /// toggles.
    pub fn save<N: ArtifactNamer + ?Sized>(
        &self,
        image_path: &Path,
        report: &HotspotReport,
        namer: &N,
    ) -> Result<HotspotArtifacts> {
        let heat_path = namer.artifact_path(image_path, HOTSPOTS_HEAT_SUFFIX, "png");
        let overlay_path = namer.artifact_path(image_path, HOTSPOTS_OVERLAY_SUFFIX, "png");
        let outputs = self.options.outputs;
        if outputs.save_heat {
            save_rgb_image(&report.heat_image, &heat_path)?;
        }
        if outputs.save_overlay {
            save_rgb_image(&report.overlay, &overlay_path)?;
        }
        Ok(HotspotArtifacts {
            heat_path,
            overlay_path,
            heat_written: outputs.save_heat,
            overlay_written: outputs.save_overlay,
            peak: report.peak,
        })
    }

    fn extract(&self, gray: &ImageF32, normalize: bool) -> Result<SignalMaps> {
        let toggles = self.options.signals;
        let finish = |map: ImageF32| {
            if normalize {
                robust_normalize(&map)
            } else {
                map
            }
        };

        let edge_job = || -> Result<Option<ImageF32>> {
            Ok(toggles.edge.then(|| finish(edge_energy(gray))))
        };
        let variance_job = || -> Result<Option<ImageF32>> {
            if !toggles.variance {
                return Ok(None);
            }
            Ok(Some(finish(local_variance(gray, self.options.variance_window)?)))
        };
        let high_frequency_job = || -> Result<Option<ImageF32>> {
            if !toggles.high_frequency {
                return Ok(None);
            }
            Ok(Some(finish(high_frequency_residual(
                gray,
                self.options.blur_sigma,
            )?)))
        };

        let (edge, (variance, high_frequency)) = if self.options.parallel {
            rayon::join(edge_job, || rayon::join(variance_job, high_frequency_job))
        } else {
            (edge_job(), (variance_job(), high_frequency_job()))
        };

        Ok(SignalMaps {
            edge: edge?,
            variance: variance?,
            high_frequency: high_frequency?,
        })
    }
}
