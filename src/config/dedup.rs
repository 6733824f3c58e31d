use super::load_json_config;
use crate::error::Result;
use crate::proposals::DedupOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What the `roi_dedup` tool reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupInput {
    /// Raw image-analysis response.
    #[default]
    Analysis,
    /// An ROI payload written earlier.
    Payload,
}

/// Config of the `roi_dedup` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct DedupToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub input_kind: DedupInput,
    /// Image the response belongs to; recorded in the payload context.
    #[serde(default)]
    pub image_path: Option<String>,
    pub output: PathBuf,
    #[serde(default)]
    pub dedup: DedupOptions,
}

pub fn load_config(path: &Path) -> Result<DedupToolConfig> {
    load_json_config(path)
}
