use super::load_json_config;
use crate::error::Result;
use crate::hotspots::HotspotOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config of the single-image `hotspots` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct HotspotToolConfig {
    pub input: PathBuf,
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    #[serde(default)]
    pub hotspots: HotspotOptions,
    /// When set, the normalized signal maps and the fused heat are also
    /// written here as grayscale PNGs.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

pub fn load_config(path: &Path) -> Result<HotspotToolConfig> {
    load_json_config(path)
}
