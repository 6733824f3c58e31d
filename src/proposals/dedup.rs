use super::iou::iou;
use super::priority::{compare_priority, DenseCaptionsFirst, SourcePriority};
use crate::error::{InspectError, Result};
use crate::types::Proposal;
use log::debug;
use serde::{Deserialize, Serialize};

/// Suppression parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    /// Maximum pairwise IoU allowed between retained proposals, in `(0, 1]`.
    pub keep_threshold: f32,
    /// Maximum number of retained proposals; `<= 0` keeps all of them.
    pub limit: i64,
    /// Drop zero-area boxes before suppression. They would otherwise always
    /// survive, since their IoU with anything is 0.
    pub drop_zero_area: bool,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            keep_threshold: 0.6,
            limit: 0,
            drop_zero_area: false,
        }
    }
}

impl DedupOptions {
    pub fn new(keep_threshold: f32, limit: i64) -> Self {
        Self {
            keep_threshold,
            limit,
            ..Default::default()
        }
    }

    pub fn with_drop_zero_area(mut self, drop_zero_area: bool) -> Self {
        self.drop_zero_area = drop_zero_area;
        self
    }

    /// `Some(n)` for a positive limit, `None` when unlimited.
    pub fn effective_limit(&self) -> Option<usize> {
        (self.limit > 0).then(|| usize::try_from(self.limit).unwrap_or(usize::MAX))
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.keep_threshold;
        if !(t.is_finite() && t > 0.0 && t <= 1.0) {
            return Err(InspectError::InvalidOptions(format!(
                "keep_threshold must lie in (0, 1], got {t}"
            )));
        }
        Ok(())
    }
}

/// Proposals in selection order with pairwise IoU below the keep threshold.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalSet {
    proposals: Vec<Proposal>,
}

impl ProposalSet {
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Proposal> {
        self.proposals.iter()
    }

    pub fn as_slice(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn into_vec(self) -> Vec<Proposal> {
        self.proposals
    }

    /// Largest IoU between any two members, 0 for fewer than two.
    pub fn max_pairwise_iou(&self) -> f32 {
        let mut worst = 0.0f32;
        for (i, a) in self.proposals.iter().enumerate() {
            for b in &self.proposals[i + 1..] {
                worst = worst.max(iou(&a.bbox, &b.bbox));
            }
        }
        worst
    }
}

impl<'a> IntoIterator for &'a ProposalSet {
    type Item = &'a Proposal;
    type IntoIter = std::slice::Iter<'a, Proposal>;

    fn into_iter(self) -> Self::IntoIter {
        self.proposals.iter()
    }
}

/// Greedy non-maximum suppression over region proposals.
#[derive(Clone, Debug, Default)]
pub struct ProposalDeduplicator<P = DenseCaptionsFirst> {
    options: DedupOptions,
    priority: P,
}

impl ProposalDeduplicator<DenseCaptionsFirst> {
    pub fn new(options: DedupOptions) -> Self {
        Self {
            options,
            priority: DenseCaptionsFirst,
        }
    }
}

impl<P: SourcePriority> ProposalDeduplicator<P> {
    /// Use a different source ranking.
    pub fn with_priority<Q: SourcePriority>(self, priority: Q) -> ProposalDeduplicator<Q> {
        ProposalDeduplicator {
            options: self.options,
            priority,
        }
    }

    pub fn options(&self) -> &DedupOptions {
        &self.options
    }

    /// Select a non-redundant, priority-ordered subset of `proposals`.
    ///
    /// Fails on invalid options or on a malformed proposal (negative extent,
    /// confidence outside `[0, 1]`); nothing is silently skipped.
    pub fn dedup(&self, proposals: &[Proposal]) -> Result<ProposalSet> {
        self.options.validate()?;
        for (index, p) in proposals.iter().enumerate() {
            validate_proposal(index, p)?;
        }

        let mut ordered: Vec<&Proposal> = proposals
            .iter()
            .filter(|p| !(self.options.drop_zero_area && p.bbox.is_degenerate()))
            .collect();
        let dropped = proposals.len() - ordered.len();
        // Stable: equal keys keep input order.
        ordered.sort_by(|a, b| compare_priority(&self.priority, a, b));

        let threshold = self.options.keep_threshold;
        let mut selected: Vec<Proposal> = Vec::new();
        for p in ordered {
            let max_overlap = selected
                .iter()
                .map(|s| iou(&p.bbox, &s.bbox))
                .fold(0.0f32, f32::max);
            if selected.is_empty() || max_overlap < threshold {
                selected.push(p.clone());
            }
        }

        let suppressed = proposals.len() - dropped - selected.len();
        if let Some(limit) = self.options.effective_limit() {
            selected.truncate(limit);
        }
        debug!(
            "dedup: {} in, {} zero-area dropped, {} suppressed, {} kept (threshold {:.2})",
            proposals.len(),
            dropped,
            suppressed,
            selected.len(),
            threshold
        );

        Ok(ProposalSet {
            proposals: selected,
        })
    }
}

fn validate_proposal(index: usize, p: &Proposal) -> Result<()> {
    if p.bbox.w < 0 || p.bbox.h < 0 {
        return Err(InspectError::MalformedProposal {
            index,
            reason: format!("negative box extent {}×{}", p.bbox.w, p.bbox.h),
        });
    }
    if !(0.0..=1.0).contains(&p.confidence) {
        return Err(InspectError::MalformedProposal {
            index,
            reason: format!("confidence {} outside [0, 1]", p.confidence),
        });
    }
    Ok(())
}

/// Convenience wrapper using the default dense-captions-first ranking.
pub fn dedup_proposals(
    proposals: &[Proposal],
    keep_threshold: f32,
    limit: i64,
) -> Result<ProposalSet> {
    ProposalDeduplicator::new(DedupOptions::new(keep_threshold, limit)).dedup(proposals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoundingBox, ProposalSource};

    fn objects(conf: f32, x: i32, y: i32, w: i32, h: i32) -> Proposal {
        Proposal::new(ProposalSource::Objects, "obj", conf, BoundingBox::new(x, y, w, h))
    }

    fn caption(conf: f32, x: i32, y: i32, w: i32, h: i32) -> Proposal {
        Proposal::new(
            ProposalSource::DenseCaptions,
            "caption",
            conf,
            BoundingBox::new(x, y, w, h),
        )
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let set = dedup_proposals(&[], 0.6, 0).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn identical_duplicate_is_rejected() {
        let p = objects(0.7, 0, 0, 10, 10);
        let set = dedup_proposals(&[p.clone(), p.clone()], 0.6, 0).unwrap();
        assert_eq!(set.as_slice(), &[p]);
    }

    #[test]
    fn source_priority_beats_confidence() {
        let obj = objects(0.9, 0, 0, 10, 10);
        let cap = caption(0.5, 100, 100, 10, 10);
        let set = dedup_proposals(&[obj.clone(), cap.clone()], 0.6, 0).unwrap();
        assert_eq!(set.as_slice(), &[cap, obj]);
    }

    #[test]
    fn overlapping_lower_priority_is_suppressed() {
        let cap = caption(0.2, 0, 0, 10, 10);
        let obj = objects(0.99, 1, 1, 10, 10); // IoU 81/119 ≈ 0.68
        let set = dedup_proposals(&[obj, cap.clone()], 0.6, 0).unwrap();
        assert_eq!(set.as_slice(), &[cap]);
    }

    #[test]
    fn overlap_equal_to_threshold_is_rejected() {
        // IoU exactly 0.5: 10×10 vs the same box widened to 20×10.
        let a = objects(0.9, 0, 0, 20, 10);
        let b = objects(0.8, 0, 0, 10, 10);
        let set = dedup_proposals(&[a.clone(), b.clone()], 0.5, 0).unwrap();
        assert_eq!(set.len(), 1);
        let set = dedup_proposals(&[a, b], 0.51, 0).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn limit_keeps_highest_priority() {
        let obj = objects(0.9, 0, 0, 10, 10);
        let cap = caption(0.5, 100, 100, 10, 10);
        let set = dedup_proposals(&[obj, cap.clone()], 0.6, 1).unwrap();
        assert_eq!(set.as_slice(), &[cap]);

        let apart = [objects(0.1, 0, 0, 1, 1), objects(0.2, 5, 5, 1, 1)];
        let unlimited = dedup_proposals(&apart, 0.6, -3).unwrap();
        assert_eq!(unlimited.len(), 2);
    }

    #[test]
    fn zero_area_boxes_survive_unless_dropped() {
        let full = objects(0.9, 0, 0, 10, 10);
        let empty = objects(0.8, 2, 2, 0, 0);
        let set = dedup_proposals(&[full.clone(), empty.clone(), empty.clone()], 0.6, 0).unwrap();
        assert_eq!(set.len(), 3);

        let opts = DedupOptions::default().with_drop_zero_area(true);
        let set = ProposalDeduplicator::new(opts).dedup(&[full.clone(), empty]).unwrap();
        assert_eq!(set.as_slice(), &[full]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let a = objects(0.5, 0, 0, 10, 10);
        let b = objects(0.5, 50, 0, 10, 10);
        let set = dedup_proposals(&[b.clone(), a.clone()], 0.6, 0).unwrap();
        assert_eq!(set.as_slice(), &[b, a]);
    }

    #[test]
    fn malformed_proposal_fails_the_call() {
        let good = objects(0.5, 0, 0, 10, 10);
        let bad = objects(0.5, 0, 0, -4, 10);
        let err = dedup_proposals(&[good, bad], 0.6, 0).unwrap_err();
        assert!(matches!(err, InspectError::MalformedProposal { index: 1, .. }));

        let nan = objects(f32::NAN, 0, 0, 4, 4);
        assert!(dedup_proposals(&[nan], 0.6, 0).is_err());
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        for t in [0.0, -0.1, 1.5, f32::NAN] {
            assert!(dedup_proposals(&[], t, 0).is_err(), "threshold {t}");
        }
        assert!(dedup_proposals(&[], 1.0, 0).is_ok());
    }
}
