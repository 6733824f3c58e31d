//! Region proposals: overlap measure, priority ordering and deduplication.
//!
//! Raw proposals come from one or more detection sources (dense captions,
//! object detection, ...) and overlap heavily. The deduplicator runs a greedy
//! non-maximum suppression:
//!
//! 1. Stable-sort by `(source rank, descending confidence)`; dense-caption
//!    regions rank first by default.
//! 2. Accept a proposal only if its IoU with every accepted one stays
//!    strictly below `keep_threshold`.
//! 3. Truncate to `limit` when a positive limit is set.
//!
//! The result is a `ProposalSet` in which every pair has IoU below the
//! threshold and the order is the selection order.
//!
//! Cost is O(n²) in the number of proposals, fine for the few hundred a
//! vision service returns per image.

pub mod analysis;
pub mod dedup;
pub mod iou;
pub mod priority;
pub mod source;

pub use analysis::{parse_analysis_response, AnalysisResponse};
pub use dedup::{dedup_proposals, DedupOptions, ProposalDeduplicator, ProposalSet};
pub use iou::iou;
pub use priority::{compare_priority, DenseCaptionsFirst, SourcePriority};
pub use source::{identify_regions, RegionProposer, SidecarAnalysis};
