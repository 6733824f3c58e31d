use super::load_json_config;
use crate::error::Result;
use crate::hotspots::HotspotOptions;
use crate::proposals::DedupOptions;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Overrides `images_dir`.
pub const IMAGES_PATH_ENV: &str = "IMAGES_PATH";
/// Overrides `artifacts_dir`.
pub const ARTIFACTS_DIR_ENV: &str = "ARTIFACTS_DIR";

/// Batch run over a directory of images.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory scanned for input images (not recursive).
    pub images_dir: PathBuf,
    /// Directory receiving payloads and heat images.
    pub artifacts_dir: PathBuf,
    /// Directory holding `<stem>.analysis.json` responses. Region
    /// identification is skipped when unset.
    pub analysis_dir: Option<PathBuf>,
    /// Write the deduplicated ROI payload next to the heat images.
    pub save_payload: bool,
    /// Run the hotspot fuser.
    pub hotspots_enabled: bool,
    pub dedup: DedupOptions,
    pub hotspots: HotspotOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("./images/"),
            artifacts_dir: PathBuf::from("artifacts"),
            analysis_dir: None,
            save_payload: true,
            hotspots_enabled: true,
            dedup: DedupOptions::default(),
            hotspots: HotspotOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Apply environment overrides on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(IMAGES_PATH_ENV).filter(|v| !v.is_empty()) {
            self.images_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ARTIFACTS_DIR_ENV).filter(|v| !v.is_empty()) {
            self.artifacts_dir = PathBuf::from(dir);
        }
        self
    }
}

/// Load a pipeline config file and apply environment overrides.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let config: PipelineConfig = load_json_config(path)?;
    Ok(config.with_env_overrides())
}
