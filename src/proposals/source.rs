//! Boundary to whatever produces raw region proposals for an image.
//!
//! The crate never talks to a vision service itself. A `RegionProposer`
//! hands back the raw payload; `identify_regions` then deduplicates it.
use super::analysis::parse_analysis_response;
use super::dedup::ProposalDeduplicator;
use super::priority::SourcePriority;
use crate::error::{InspectError, Result};
use crate::types::RoiPayload;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Produces raw (not yet deduplicated) proposals for an image.
pub trait RegionProposer: Sync {
    fn propose(&self, image_path: &Path) -> Result<RoiPayload>;
}

/// Reads analysis responses fetched earlier and stored as
/// `<dir>/<image stem>.analysis.json`.
#[derive(Clone, Debug)]
pub struct SidecarAnalysis {
    dir: PathBuf,
}

impl SidecarAnalysis {
    pub const SUFFIX: &'static str = ".analysis.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn sidecar_path(&self, image_path: &Path) -> PathBuf {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.dir.join(format!("{stem}{}", Self::SUFFIX))
    }

    pub fn has_sidecar(&self, image_path: &Path) -> bool {
        self.sidecar_path(image_path).is_file()
    }
}

impl RegionProposer for SidecarAnalysis {
    fn propose(&self, image_path: &Path) -> Result<RoiPayload> {
        let path = self.sidecar_path(image_path);
        let json = fs::read_to_string(&path).map_err(|e| InspectError::io(&path, e))?;
        debug!("read analysis response {}", path.display());
        parse_analysis_response(&json, &image_path.to_string_lossy())
    }
}

/// Fetch raw proposals and replace them with the deduplicated set.
pub fn identify_regions<R, P>(
    proposer: &R,
    image_path: &Path,
    dedup: &ProposalDeduplicator<P>,
) -> Result<RoiPayload>
where
    R: RegionProposer + ?Sized,
    P: SourcePriority,
{
    let mut payload = proposer.propose(image_path)?;
    let selected = dedup.dedup(&payload.proposals)?;
    payload.proposals = selected.into_vec();
    Ok(payload)
}
