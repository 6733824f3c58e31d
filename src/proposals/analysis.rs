//! Conversion of an image-analysis service response into an `RoiPayload`.
//!
//! The response layout is the cloud vision "analyze" result:
//!
//! ```json
//! {
//!   "captionResult": {"text": "...", "confidence": 0.8},
//!   "denseCaptionsResult": {"values": [{"text": "...", "confidence": 0.7,
//!                            "boundingBox": {"x": 0, "y": 0, "w": 10, "h": 10}}]},
//!   "objectsResult": {"values": [{"boundingBox": {...}, "tags": [{"name": "cup", "confidence": 0.6}]}]},
//!   "tagsResult": {"values": [{"name": "indoor", "confidence": 0.9}]}
//! }
//! ```
//!
//! Missing texts default to `""` and missing confidences to `0.0`. A region
//! without a complete `boundingBox`, or with a negative extent, fails the
//! whole conversion.
use crate::error::{InspectError, Result};
use crate::types::{BoundingBox, GlobalTag, ImageContext, Proposal, ProposalSource, RoiPayload};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default)]
    pub caption_result: Option<CaptionResult>,
    #[serde(default)]
    pub dense_captions_result: Option<RegionList<DenseCaption>>,
    #[serde(default)]
    pub objects_result: Option<RegionList<DetectedObject>>,
    #[serde(default)]
    pub tags_result: Option<RegionList<TagValue>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CaptionResult {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegionList<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> Default for RegionList<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

/// Box as reported by the service; every field must be present.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawBox {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenseCaption {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub bounding_box: Option<RawBox>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub tags: Vec<TagValue>,
    #[serde(default)]
    pub bounding_box: Option<RawBox>,
}

impl DetectedObject {
    /// Explicit name, else the first tag, else `"object"`.
    fn label(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| self.tags.first().map(|t| t.name.clone()))
            .unwrap_or_else(|| "object".to_string())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TagValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
}

impl AnalysisResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| InspectError::json("analysis response", e))
    }

    /// Build the payload; proposals keep response order (dense captions, then
    /// objects) and are not yet deduplicated.
    pub fn into_payload(self, image_path: &str) -> Result<RoiPayload> {
        let mut payload = RoiPayload::default();

        if let Some(cap) = self.caption_result {
            if let Some(text) = cap.text.filter(|t| !t.is_empty()) {
                payload.context = ImageContext {
                    image_path: Some(image_path.to_string()),
                    text: Some(text),
                    confidence: Some(cap.confidence.unwrap_or(0.0) as f32),
                };
            }
        }

        let dense = self.dense_captions_result.unwrap_or_default().values;
        for v in dense {
            let index = payload.proposals.len();
            let bbox = to_bbox(index, v.bounding_box.as_ref())?;
            payload.proposals.push(Proposal::new(
                ProposalSource::DenseCaptions,
                v.text,
                v.confidence as f32,
                bbox,
            ));
        }

        let objects = self.objects_result.unwrap_or_default().values;
        for o in objects {
            let index = payload.proposals.len();
            let bbox = to_bbox(index, o.bounding_box.as_ref())?;
            payload.proposals.push(Proposal::new(
                ProposalSource::Objects,
                o.label(),
                o.confidence as f32,
                bbox,
            ));
        }

        payload.global_tags = self
            .tags_result
            .unwrap_or_default()
            .values
            .into_iter()
            .map(|t| GlobalTag {
                name: t.name,
                confidence: t.confidence as f32,
            })
            .collect();

        Ok(payload)
    }
}

fn to_bbox(index: usize, raw: Option<&RawBox>) -> Result<BoundingBox> {
    let malformed = |reason: &str| InspectError::MalformedProposal {
        index,
        reason: reason.to_string(),
    };
    let raw = raw.ok_or_else(|| malformed("missing boundingBox"))?;
    let coord = |v: Option<f64>, name: &str| -> Result<i32> {
        let v = v.ok_or_else(|| malformed(&format!("boundingBox missing `{name}`")))?;
        if !v.is_finite() {
            return Err(malformed(&format!("boundingBox `{name}` is not finite")));
        }
        Ok(v.trunc() as i32)
    };
    let bbox = BoundingBox::new(
        coord(raw.x, "x")?,
        coord(raw.y, "y")?,
        coord(raw.w, "w")?,
        coord(raw.h, "h")?,
    );
    if bbox.w < 0 || bbox.h < 0 {
        return Err(malformed("negative boundingBox extent"));
    }
    Ok(bbox)
}

/// Parse a raw response string straight into a payload.
pub fn parse_analysis_response(json: &str, image_path: &str) -> Result<RoiPayload> {
    AnalysisResponse::from_json(json)?.into_payload(image_path)
}
