//! Batch driver: one task per image in a directory.
//!
//! For every image the driver optionally identifies regions from a stored
//! analysis response, persists the deduplicated payload, then runs the
//! hotspot fuser. Images are independent and processed on the rayon pool; a
//! failing image is recorded in its outcome and the batch carries on.
use crate::artifacts::{ArtifactNamer, ArtifactsDir, ROI_PAYLOAD_SUFFIX};
use crate::config::pipeline::PipelineConfig;
use crate::error::{InspectError, Result};
use crate::hotspots::{HotspotArtifacts, HotspotFuser};
use crate::image::io::write_json_file;
use crate::proposals::{identify_regions, ProposalDeduplicator, SidecarAnalysis};
use image::ImageFormat;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of one image.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOutcome {
    pub image: PathBuf,
    /// Where the ROI payload was written, if region identification ran.
    pub payload_path: Option<PathBuf>,
    pub proposal_count: Option<usize>,
    pub hotspots: Option<HotspotArtifacts>,
    /// Failure of region identification or payload persistence.
    pub payload_error: Option<String>,
    /// Failure of the hotspot stage.
    pub hotspot_error: Option<String>,
}

impl ImageOutcome {
    fn new(image: PathBuf) -> Self {
        Self {
            image,
            payload_path: None,
            proposal_count: None,
            hotspots: None,
            payload_error: None,
            hotspot_error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.payload_error.is_none() && self.hotspot_error.is_none()
    }

    /// Stage errors of this image, proposal stage first.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        [&self.payload_error, &self.hotspot_error]
            .into_iter()
            .filter_map(|e| e.as_deref())
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub outcomes: Vec<ImageOutcome>,
    /// Images skipped because their artifact key was already taken.
    pub skipped: Vec<PathBuf>,
    pub elapsed_ms: f64,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Regular files of `dir` with an image extension, sorted by path.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| InspectError::io(dir, e))?;
    let mut images = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| InspectError::io(dir, e))?.path();
        if path.is_file() && ImageFormat::from_path(&path).is_ok() {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Split `images` into those with a unique artifact key and the later
/// duplicates that would overwrite earlier outputs.
pub fn partition_unique_keys(images: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(images.len());
    let mut duplicates = Vec::new();
    for path in images {
        if seen.insert(ArtifactsDir::image_key(&path)) {
            unique.push(path);
        } else {
            duplicates.push(path);
        }
    }
    (unique, duplicates)
}

pub struct Pipeline {
    config: PipelineConfig,
    dedup: ProposalDeduplicator,
    fuser: HotspotFuser,
    namer: ArtifactsDir,
    proposer: Option<SidecarAnalysis>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.dedup.validate()?;
        let fuser = HotspotFuser::new(config.hotspots.clone())?;
        let dedup = ProposalDeduplicator::new(config.dedup.clone());
        let namer = ArtifactsDir::new(&config.artifacts_dir);
        let proposer = config.analysis_dir.as_ref().map(SidecarAnalysis::new);
        Ok(Self {
            config,
            dedup,
            fuser,
            namer,
            proposer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every image of the configured directory.
    pub fn run(&self) -> Result<BatchSummary> {
        let start = Instant::now();
        let images = list_images(&self.config.images_dir)?;
        let (images, skipped) = partition_unique_keys(images);
        for path in &skipped {
            warn!(
                "skipping {}: artifact name collides with an earlier image",
                path.display()
            );
        }
        info!(
            "processing {} images from {}",
            images.len(),
            self.config.images_dir.display()
        );

        let outcomes: Vec<ImageOutcome> =
            images.into_par_iter().map(|path| self.process(path)).collect();
        let summary = BatchSummary {
            outcomes,
            skipped,
            elapsed_ms: crate::diagnostics::timing::elapsed_ms(start),
        };
        info!(
            "batch done: {} ok, {} failed, {} skipped in {:.1} ms",
            summary.succeeded(),
            summary.failed(),
            summary.skipped.len(),
            summary.elapsed_ms
        );
        Ok(summary)
    }

    /// Run both stages on one image. The stages are independent: a failure
    /// in one is recorded in the outcome and does not stop the other.
    pub fn process(&self, image: PathBuf) -> ImageOutcome {
        let mut outcome = ImageOutcome::new(image);
        if let Some(proposer) = &self.proposer {
            if let Err(err) = self.identify_into(proposer, &mut outcome) {
                warn!("{}: region identification failed: {err}", outcome.image.display());
                outcome.payload_error = Some(err.to_string());
            }
        }
        if self.config.hotspots_enabled {
            match self.fuser.run(&outcome.image, &self.namer) {
                Ok(artifacts) => {
                    info!(
                        "{}: peak {:.3} at ({}, {})",
                        outcome.image.display(),
                        artifacts.peak.value,
                        artifacts.peak.x,
                        artifacts.peak.y
                    );
                    outcome.hotspots = Some(artifacts);
                }
                Err(err) => {
                    warn!("{}: hotspots failed: {err}", outcome.image.display());
                    outcome.hotspot_error = Some(err.to_string());
                }
            }
        }
        outcome
    }

    fn identify_into(
        &self,
        proposer: &SidecarAnalysis,
        outcome: &mut ImageOutcome,
    ) -> Result<()> {
        let image = &outcome.image;
        if !proposer.has_sidecar(image) {
            warn!(
                "no analysis response for {} (expected {})",
                image.display(),
                proposer.sidecar_path(image).display()
            );
            return Ok(());
        }
        let payload = identify_regions(proposer, image, &self.dedup)?;
        outcome.proposal_count = Some(payload.proposals.len());
        if self.config.save_payload {
            let path = self.namer.artifact_path(image, ROI_PAYLOAD_SUFFIX, "json");
            write_json_file(&path, &payload)?;
            outcome.payload_path = Some(path);
        }
        Ok(())
    }
}
