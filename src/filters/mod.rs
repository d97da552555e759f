//! Temporal smoothing stages for landmark coordinates and derived angles.
//!
//! Both stages are exponential moving averages with their own weight.
//! They hold no state of their own: the previous smoothed sample is passed
//! in and the new one returned, so the caller decides where state lives
//! and when it is dropped.

/// Scalar exponential moving average shared by both stages
pub mod exponential;

/// Per-coordinate smoothing of landmark frames
pub mod landmark;

/// Per-name smoothing of derived angles
pub mod angle;

pub use angle::{smooth_angles, AngleSmoother};
pub use exponential::ExponentialFilter;
pub use landmark::{smooth_landmarks, LandmarkSmoother};

/// A smoothing stage over whole frames
pub trait FrameFilter {
    /// Sample type going in and coming out
    type Sample: Default;

    /// Smooth `input` against the previous smoothed sample.
    ///
    /// `None` means the subject was lost; the returned state is empty so
    /// the next sample re-seeds the filter.
    fn apply(&self, previous: &Self::Sample, input: Option<&Self::Sample>) -> Self::Sample;

    /// Get filter name
    fn name(&self) -> &str;
}

/// Filter that passes samples through unchanged
pub struct NoFilter<T>(std::marker::PhantomData<T>);

impl<T> NoFilter<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T> Default for NoFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Clone> FrameFilter for NoFilter<T> {
    type Sample = T;

    fn apply(&self, _previous: &T, input: Option<&T>) -> T {
        input.cloned().unwrap_or_default()
    }

    fn name(&self) -> &str {
        "NoFilter"
    }
}
