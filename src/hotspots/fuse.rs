//! Weighted fusion of normalized signal maps.
use crate::image::ImageF32;

pub const EDGE_WEIGHT: f32 = 0.4;
pub const VARIANCE_WEIGHT: f32 = 0.3;
pub const HIGH_FREQUENCY_WEIGHT: f32 = 0.3;

/// Normalized (`[0, 1]`) signal maps; `None` for disabled signals.
#[derive(Clone, Debug, Default)]
pub struct SignalMaps {
    pub edge: Option<ImageF32>,
    pub variance: Option<ImageF32>,
    pub high_frequency: Option<ImageF32>,
}

impl SignalMaps {
    fn weighted(&self) -> [(Option<&ImageF32>, f32); 3] {
        [
            (self.edge.as_ref(), EDGE_WEIGHT),
            (self.variance.as_ref(), VARIANCE_WEIGHT),
            (self.high_frequency.as_ref(), HIGH_FREQUENCY_WEIGHT),
        ]
    }
}

/// `0.4·edge + 0.3·variance + 0.3·high_frequency` over the enabled maps.
///
/// Weights are absolute: a disabled signal contributes nothing and the
/// others are not rescaled, so the result stays in `[0, 1]` but its ceiling
/// drops with every disabled signal.
pub fn fuse(maps: &SignalMaps, w: usize, h: usize) -> ImageF32 {
    let mut heat = ImageF32::new(w, h);
    for (map, weight) in maps.weighted() {
        let Some(map) = map else { continue };
        debug_assert_eq!((map.w, map.h), (w, h));
        for (dst, &v) in heat.data.iter_mut().zip(&map.data) {
            *dst += weight * v;
        }
    }
    heat
}
