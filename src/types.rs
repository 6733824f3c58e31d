//! Plain data types shared by the proposal and payload code.
//!
//! The serde layout matches the persisted ROI payload:
//! `{"context": {...}, "proposals": [{source, text, confidence, bbox:{x,y,w,h}}], "global_tags": [{name, confidence}]}`.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned box in integer pixel coordinates, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// `w * h`, widened so large boxes cannot overflow.
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Corners `(x1, y1, x2, y2)` with `x2 = x + w`, `y2 = y + h`.
    #[inline]
    pub fn corners(&self) -> (i64, i64, i64, i64) {
        let x1 = self.x as i64;
        let y1 = self.y as i64;
        (x1, y1, x1 + self.w as i64, y1 + self.h as i64)
    }

    /// Overlap area with `other`, zero when the boxes are disjoint.
    pub fn intersection_area(&self, other: &BoundingBox) -> i64 {
        let (ax1, ay1, ax2, ay2) = self.corners();
        let (bx1, by1, bx2, by2) = other.corners();
        let iw = (ax2.min(bx2) - ax1.max(bx1)).max(0);
        let ih = (ay2.min(by2) - ay1.max(by1)).max(0);
        iw * ih
    }

    pub fn is_degenerate(&self) -> bool {
        self.area() == 0
    }
}

/// Which detector produced a proposal.
///
/// Unknown sources round-trip through `Other` so payloads from newer
/// analysis versions are not rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProposalSource {
    DenseCaptions,
    Objects,
    Other(String),
}

impl ProposalSource {
    pub fn as_str(&self) -> &str {
        match self {
            ProposalSource::DenseCaptions => "dense_captions",
            ProposalSource::Objects => "objects",
            ProposalSource::Other(name) => name,
        }
    }
}

impl From<String> for ProposalSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "dense_captions" => ProposalSource::DenseCaptions,
            "objects" => ProposalSource::Objects,
            _ => ProposalSource::Other(value),
        }
    }
}

impl From<ProposalSource> for String {
    fn from(value: ProposalSource) -> Self {
        match value {
            ProposalSource::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProposalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate region of interest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub source: ProposalSource,
    pub text: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl Proposal {
    pub fn new(
        source: ProposalSource,
        text: impl Into<String>,
        confidence: f32,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            source,
            text: text.into(),
            confidence,
            bbox,
        }
    }
}

/// Image-level tag reported alongside the proposals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalTag {
    pub name: String,
    pub confidence: f32,
}

/// Caption context of the analysed image. Empty when no caption was returned.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Persisted per-image ROI payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiPayload {
    #[serde(default)]
    pub context: ImageContext,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub global_tags: Vec<GlobalTag>,
}
