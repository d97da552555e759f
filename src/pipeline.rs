//! Per-frame orchestration: validate, smooth, measure, smooth, classify.
//!
//! [`process_frame`] is a pure function over the previous
//! [`SmoothingState`]; [`PosePipeline`] wraps it for callers that want the
//! state kept for them. Neither ever fails: every degenerate input ends
//! up as an unavailable value in the output.

use crate::{
    angles::{compute_angles, AngleMap, AngleName, AngleValue},
    classifier::{classify, default_targets, AngleTarget, Severity, TargetTable},
    constants::{DEFAULT_ANGLE_ALPHA, DEFAULT_LANDMARK_ALPHA},
    filters::{AngleSmoother, ExponentialFilter, FrameFilter, LandmarkSmoother},
    landmarks::{
        validate_frame, BodyLandmark, LandmarkFrame, Point2, ValidationRules, RELEVANT_LANDMARKS, SKELETON_CONNECTIONS,
    },
    side::{feedback_markers, select_active, FeedbackMarker, Laterality},
    Result,
};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the pipeline needs besides the frame and the state
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Stage one: landmark coordinate smoothing
    pub landmark_smoother: LandmarkSmoother,
    /// Stage two: angle smoothing
    pub angle_smoother: AngleSmoother,
    pub validation: ValidationRules,
    pub targets: TargetTable,
}

impl PipelineSettings {
    /// Settings with the given smoothing weights and default targets
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` if either alpha is not in (0, 1]
    pub fn new(landmark_alpha: f64, angle_alpha: f64) -> Result<Self> {
        Ok(Self {
            landmark_smoother: LandmarkSmoother::from_filter(ExponentialFilter::try_new(landmark_alpha)?),
            angle_smoother: AngleSmoother::from_filter(ExponentialFilter::try_new(angle_alpha)?),
            validation: ValidationRules::default(),
            targets: default_targets(),
        })
    }

    #[must_use]
    pub fn with_targets(mut self, targets: TargetTable) -> Self {
        self.targets = targets;
        self
    }

    #[must_use]
    pub const fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = validation;
        self
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            landmark_smoother: LandmarkSmoother::new(DEFAULT_LANDMARK_ALPHA),
            angle_smoother: AngleSmoother::new(DEFAULT_ANGLE_ALPHA),
            validation: ValidationRules::default(),
            targets: default_targets(),
        }
    }
}

/// Smoothed history carried from one frame to the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothingState {
    /// Last smoothed landmarks (validated points only)
    pub landmarks: LandmarkFrame,
    /// Last smoothed angle values, kept at full precision
    pub angles: AngleMap,
}

impl SmoothingState {
    /// True before the first detection and after every tracking loss
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty() && self.angles.is_empty()
    }
}

/// One displayed angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleMetric {
    pub value: AngleValue,
    pub severity: Severity,
    /// Target the value was classified against, if one is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<AngleTarget>,
}

/// Output of one pipeline step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameMetrics {
    /// False when the pose source reported no subject
    pub detected: bool,
    /// Active angles only, keyed by name
    pub metrics: BTreeMap<AngleName, AngleMetric>,
    /// Smoothed landmarks for the overlay, canonical indices preserved
    pub landmarks: LandmarkFrame,
    /// Landmarks to emphasise with feedback colours
    pub markers: Vec<FeedbackMarker>,
}

impl FrameMetrics {
    /// Overlay bones whose two endpoints are both present
    #[must_use]
    pub fn skeleton_segments(&self) -> Vec<(Point2, Point2)> {
        SKELETON_CONNECTIONS
            .iter()
            .filter_map(|&(a, b)| {
                let p = self.landmarks.landmark(a)?;
                let q = self.landmarks.landmark(b)?;
                Some((p.point(), q.point()))
            })
            .collect()
    }

    /// Overlay joints that are present, in drawing order
    #[must_use]
    pub fn joint_points(&self) -> Vec<(BodyLandmark, Point2)> {
        RELEVANT_LANDMARKS
            .iter()
            .filter_map(|&which| Some((which, self.landmarks.landmark(which)?.point())))
            .collect()
    }

    /// Most concerning severity among the metrics that could be classified
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.metrics
            .values()
            .map(|m| m.severity)
            .filter(|&s| s != Severity::Unavailable)
            .max()
    }
}

fn collect_metrics(angles: &AngleMap, laterality: Laterality, targets: &TargetTable) -> BTreeMap<AngleName, AngleMetric> {
    select_active(laterality)
        .iter()
        .map(|&name| {
            let value = angles.get(&name).copied().unwrap_or_default();
            let target = targets.get(&name).copied();
            let metric = AngleMetric {
                value,
                severity: classify(value, target.as_ref()),
                target,
            };
            (name, metric)
        })
        .collect()
}

/// Run one frame through the pipeline.
///
/// `raw` is `None` (or an empty frame) when no subject was detected; the
/// metrics are then all unavailable and the returned state is empty, so
/// the next detection starts from unfiltered values.
#[must_use]
pub fn process_frame(
    raw: Option<&LandmarkFrame>,
    state: &SmoothingState,
    laterality: Laterality,
    settings: &PipelineSettings,
) -> (FrameMetrics, SmoothingState) {
    let Some(raw) = raw.filter(|frame| !frame.is_empty()) else {
        let metrics = FrameMetrics {
            detected: false,
            metrics: collect_metrics(&AngleMap::new(), laterality, &settings.targets),
            landmarks: LandmarkFrame::new(),
            markers: Vec::new(),
        };
        return (metrics, SmoothingState::default());
    };

    let valid = validate_frame(raw, &settings.validation);
    let landmarks = settings.landmark_smoother.apply(&state.landmarks, Some(&valid));
    let raw_angles = compute_angles(&landmarks);
    let angles = settings.angle_smoother.apply(&state.angles, Some(&raw_angles));
    let reported: AngleMap = angles.iter().map(|(&name, &value)| (name, value.rounded())).collect();

    let metrics = FrameMetrics {
        detected: true,
        metrics: collect_metrics(&reported, laterality, &settings.targets),
        markers: feedback_markers(&reported, laterality, &settings.targets),
        landmarks: landmarks.clone(),
    };
    (metrics, SmoothingState { landmarks, angles })
}

/// Pipeline that keeps its own smoothing state between frames
#[derive(Debug, Clone, Default)]
pub struct PosePipeline {
    settings: PipelineSettings,
    laterality: Laterality,
    state: SmoothingState,
    frames: u64,
    tracking: bool,
}

impl PosePipeline {
    #[must_use]
    pub fn new(settings: PipelineSettings, laterality: Laterality) -> Self {
        info!(
            "Pose pipeline: landmark alpha {}, angle alpha {}, {} targets, side {}",
            settings.landmark_smoother.alpha(),
            settings.angle_smoother.alpha(),
            settings.targets.len(),
            laterality
        );
        Self {
            settings,
            laterality,
            ..Self::default()
        }
    }

    /// Process the next frame from the pose source
    pub fn process(&mut self, raw: Option<&LandmarkFrame>) -> FrameMetrics {
        let (metrics, state) = process_frame(raw, &self.state, self.laterality, &self.settings);
        self.frames += 1;

        if metrics.detected != self.tracking {
            if metrics.detected {
                info!("Subject acquired at frame {}", self.frames);
            } else {
                info!("Subject lost at frame {}, smoothing reset", self.frames);
            }
            self.tracking = metrics.detected;
        }
        debug!(
            "Frame {}: {} landmarks, worst severity {:?}",
            self.frames,
            metrics.landmarks.len(),
            metrics.worst_severity()
        );

        self.state = state;
        metrics
    }

    /// Drop all smoothing history
    pub fn reset(&mut self) {
        self.state = SmoothingState::default();
        self.tracking = false;
    }

    #[must_use]
    pub const fn laterality(&self) -> Laterality {
        self.laterality
    }

    /// Change the displayed side; takes effect on the next frame
    pub fn set_laterality(&mut self, laterality: Laterality) {
        if laterality != self.laterality {
            debug!("Side changed from {} to {}", self.laterality, laterality);
        }
        self.laterality = laterality;
    }

    #[must_use]
    pub const fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Settings for the next frame; already smoothed state is not touched
    pub fn settings_mut(&mut self) -> &mut PipelineSettings {
        &mut self.settings
    }

    #[must_use]
    pub const fn state(&self) -> &SmoothingState {
        &self.state
    }

    /// Number of frames processed so far
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }
}
