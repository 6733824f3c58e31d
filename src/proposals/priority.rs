//! Ordering rule for proposals competing in suppression.
use crate::types::{Proposal, ProposalSource};
use std::cmp::Ordering;

/// Ranks proposal sources; lower ranks are considered first.
pub trait SourcePriority {
    fn rank(&self, source: &ProposalSource) -> u8;
}

/// Dense-caption regions first, every other source after them.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenseCaptionsFirst;

impl SourcePriority for DenseCaptionsFirst {
    #[inline]
    fn rank(&self, source: &ProposalSource) -> u8 {
        match source {
            ProposalSource::DenseCaptions => 0,
            _ => 1,
        }
    }
}

/// Compare two proposals by `(rank(source), descending confidence)`.
pub fn compare_priority<P: SourcePriority + ?Sized>(
    priority: &P,
    a: &Proposal,
    b: &Proposal,
) -> Ordering {
    priority
        .rank(&a.source)
        .cmp(&priority.rank(&b.source))
        .then_with(|| b.confidence.total_cmp(&a.confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    fn proposal(source: ProposalSource, confidence: f32) -> Proposal {
        Proposal::new(source, "", confidence, BoundingBox::new(0, 0, 1, 1))
    }

    #[test]
    fn dense_captions_beat_higher_confidence_objects() {
        let obj = proposal(ProposalSource::Objects, 0.9);
        let cap = proposal(ProposalSource::DenseCaptions, 0.5);
        assert_eq!(compare_priority(&DenseCaptionsFirst, &cap, &obj), Ordering::Less);
        assert_eq!(compare_priority(&DenseCaptionsFirst, &obj, &cap), Ordering::Greater);
    }

    #[test]
    fn same_rank_orders_by_descending_confidence() {
        let hi = proposal(ProposalSource::Objects, 0.8);
        let lo = proposal(ProposalSource::Other("people".into()), 0.3);
        assert_eq!(compare_priority(&DenseCaptionsFirst, &hi, &lo), Ordering::Less);
        assert_eq!(compare_priority(&DenseCaptionsFirst, &hi, &hi), Ordering::Equal);
    }

    #[test]
    fn custom_priority_can_invert_sources() {
        struct ObjectsFirst;
        impl SourcePriority for ObjectsFirst {
            fn rank(&self, source: &ProposalSource) -> u8 {
                match source {
                    ProposalSource::Objects => 0,
                    _ => 1,
                }
            }
        }
        let obj = proposal(ProposalSource::Objects, 0.1);
        let cap = proposal(ProposalSource::DenseCaptions, 0.9);
        assert_eq!(compare_priority(&ObjectsFirst, &obj, &cap), Ordering::Less);
    }
}
