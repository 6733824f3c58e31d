//! Output naming for per-image artifacts.
//!
//! The default policy writes `<artifacts dir>/<image stem>_<suffix>.<ext>`,
//! e.g. `artifacts/J74Q10KAUG0-G6N3_03A_hotspots_heat.png`.
use std::path::{Path, PathBuf};

/// Suffix of the persisted ROI payload (JSON).
pub const ROI_PAYLOAD_SUFFIX: &str = "01_ROI";
/// Suffix of the false-color heat image.
pub const HOTSPOTS_HEAT_SUFFIX: &str = "03A_hotspots_heat";
/// Suffix of the heat-over-image overlay.
pub const HOTSPOTS_OVERLAY_SUFFIX: &str = "03B_hotspots_overlay";

/// Composes deterministic output paths from a source image path.
pub trait ArtifactNamer: Sync {
    fn artifact_path(&self, image_path: &Path, suffix: &str, extension: &str) -> PathBuf;
}

/// Flat artifacts directory keyed by the image file stem.
#[derive(Clone, Debug)]
pub struct ArtifactsDir {
    root: PathBuf,
}

impl ArtifactsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Key shared by every artifact of `image_path`; two images with the same
    /// key would overwrite each other's outputs.
    pub fn image_key(image_path: &Path) -> String {
        image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Default for ArtifactsDir {
    fn default() -> Self {
        Self::new("artifacts")
    }
}

impl ArtifactNamer for ArtifactsDir {
    fn artifact_path(&self, image_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = Self::image_key(image_path);
        self.root.join(format!("{stem}_{suffix}.{extension}"))
    }
}
