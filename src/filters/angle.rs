use super::{ExponentialFilter, FrameFilter};
use crate::angles::{AngleMap, AngleValue};

/// Exponential smoothing of derived angles, one filter per angle name.
///
/// Unavailable values are stored as they are and never blended with an
/// older number, so a gap shows up immediately. The first number after a
/// gap seeds the filter again. Values are kept at full precision so the
/// filter keeps closing on a constant input; rounding happens when the
/// metrics are reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSmoother {
    filter: ExponentialFilter,
}

impl AngleSmoother {
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

    fn smooth_value(&self, previous: Option<AngleValue>, raw: AngleValue) -> AngleValue {
        match (previous, raw) {
            (_, AngleValue::Unavailable) => AngleValue::Unavailable,
            (Some(AngleValue::Degrees(last)), AngleValue::Degrees(value)) => {
                AngleValue::degrees(self.filter.step(Some(last), value))
            }
            (_, value) => value,
        }
    }
}

impl FrameFilter for AngleSmoother {
    type Sample = AngleMap;

    fn apply(&self, previous: &AngleMap, input: Option<&AngleMap>) -> AngleMap {
        let Some(angles) = input else {
            return AngleMap::new();
        };
        angles
            .iter()
            .map(|(&name, &raw)| (name, self.smooth_value(previous.get(&name).copied(), raw)))
            .collect()
    }

    fn name(&self) -> &str {
        "AngleSmoother"
    }
}

/// Smooth `angles` against `previous` with weight `alpha`
///
/// # Panics
///
/// Panics if alpha is not in the range (0, 1]
#[must_use]
pub fn smooth_angles(previous: &AngleMap, angles: Option<&AngleMap>, alpha: f64) -> AngleMap {
    AngleSmoother::new(alpha).apply(previous, angles)
}
