use super::{ExponentialFilter, FrameFilter};
use crate::landmarks::{Landmark, LandmarkFrame};

/// Exponential smoothing of landmark coordinates.
///
/// x, y and z are smoothed independently. A landmark seen for the first
/// time (or again after dropping out) is taken as-is. Landmarks missing
/// from the new frame are dropped from the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSmoother {
    filter: ExponentialFilter,
}

impl LandmarkSmoother {
    /// # Panics
    ///
    /// Panics if alpha is not in the range (0, 1]
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self {
            filter: ExponentialFilter::new(alpha),
        }
    }

    #[must_use]
    pub const fn from_filter(filter: ExponentialFilter) -> Self {
        Self { filter }
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.filter.alpha()
    }

    fn smooth_point(&self, previous: Option<&Landmark>, raw: &Landmark) -> Landmark {
        let Some(last) = previous else {
            return *raw;
        };
        Landmark {
            x: self.filter.step(Some(last.x), raw.x),
            y: self.filter.step(Some(last.y), raw.y),
            z: raw.z.map(|z| self.filter.step(last.z, z)),
            visibility: raw.visibility,
        }
    }
}

impl FrameFilter for LandmarkSmoother {
    type Sample = LandmarkFrame;

    fn apply(&self, previous: &LandmarkFrame, input: Option<&LandmarkFrame>) -> LandmarkFrame {
        let Some(frame) = input else {
            return LandmarkFrame::new();
        };
        let mut smoothed = LandmarkFrame::new();
        for (index, raw) in frame.iter() {
            smoothed.set(index, self.smooth_point(previous.get(index), raw));
        }
        smoothed
    }

    fn name(&self) -> &str {
        "LandmarkSmoother"
    }
}

/// Smooth `frame` against `previous` with weight `alpha`
///
/// # Panics
///
/// Panics if alpha is not in the range (0, 1]
#[must_use]
pub fn smooth_landmarks(previous: &LandmarkFrame, frame: Option<&LandmarkFrame>, alpha: f64) -> LandmarkFrame {
    LandmarkSmoother::new(alpha).apply(previous, frame)
}
