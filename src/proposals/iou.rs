use crate::types::BoundingBox;

/// Intersection over union of two axis-aligned boxes.
///
/// Returns 0 when the union is empty (both boxes zero-area), never NaN.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let inter = a.intersection_area(b);
    let union = a.area() + b.area() - inter;
    if union <= 0 {
        return 0.0;
    }
    (inter as f64 / union as f64) as f32
}
