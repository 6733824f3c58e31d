#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod artifacts;
pub mod config;
pub mod error;
pub mod hotspots;
pub mod pipeline;
pub mod proposals;
pub mod types;

// Building blocks used by the hotspot signals.
pub mod diagnostics;
pub mod edges;
pub mod filters;
pub mod image;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{InspectError, Result};
pub use crate::hotspots::{HotspotArtifacts, HotspotFuser, HotspotOptions, HotspotReport};
pub use crate::pipeline::{BatchSummary, Pipeline};
pub use crate::proposals::{dedup_proposals, iou, DedupOptions, ProposalDeduplicator, ProposalSet};
pub use crate::types::{BoundingBox, Proposal, ProposalSource, RoiPayload};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use roi_inspect::prelude::*;
///
/// # fn main() -> roi_inspect::Result<()> {
/// let proposals = vec![
///     Proposal::new(ProposalSource::Objects, "cap", 0.7, BoundingBox::new(10, 10, 40, 40)),
///     Proposal::new(
///         ProposalSource::DenseCaptions,
///         "a bottle cap",
///         0.4,
///         BoundingBox::new(12, 10, 40, 40),
///     ),
/// ];
/// let kept = dedup_proposals(&proposals, 0.6, 0)?;
/// assert_eq!(kept.len(), 1);
///
/// let image = roi_inspect::image::io::load_image("part.png".as_ref())?;
/// let report = HotspotFuser::default().analyze(&image)?;
/// println!("peak at ({}, {})", report.peak.x, report.peak.y);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::artifacts::{ArtifactNamer, ArtifactsDir};
    pub use crate::image::{ImageF32, ImageU8, ImageView};
    pub use crate::{
        dedup_proposals, iou, BoundingBox, DedupOptions, HotspotFuser, HotspotOptions, Proposal,
        ProposalDeduplicator, ProposalSource, Result, RoiPayload,
    };
}
