use crate::{
    constants::{EXPONENTIAL_ALPHA_MAX, EXPONENTIAL_ALPHA_MIN},
    Error, Result,
};

/// Exponential smoothing of a single value.
///
/// `smoothed = α·raw + (1 − α)·previous`; a higher α tracks the input
/// faster, a lower α smooths more and lags more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialFilter {
    alpha: f64,
}

impl ExponentialFilter {
    /// Create a new exponential filter
    ///
    /// # Panics
    ///
    /// Panics if alpha is not in the range (0, 1]
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > EXPONENTIAL_ALPHA_MIN && alpha <= EXPONENTIAL_ALPHA_MAX, "Alpha must be in (0, 1]");
        Self { alpha }
    }

    /// Create a new exponential filter, rejecting an out-of-range alpha
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` if alpha is not in the range (0, 1]
    pub fn try_new(alpha: f64) -> Result<Self> {
        if alpha > EXPONENTIAL_ALPHA_MIN && alpha <= EXPONENTIAL_ALPHA_MAX {
            Ok(Self { alpha })
        } else {
            Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")))
        }
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Smooth `raw` against the previous output; the first value passes through
    #[must_use]
    pub fn step(&self, previous: Option<f64>, raw: f64) -> f64 {
        match previous {
            // Written as last + α·(raw − last) so a steady input stays exact
            Some(last) => self.alpha.mul_add(raw - last, last),
            None => raw,
        }
    }
}
