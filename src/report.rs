//! Plain-text rendering of frame metrics for terminal feedback.

use crate::{
    angles::{AngleValue, UNAVAILABLE_TEXT},
    pipeline::FrameMetrics,
};

/// Message shown when the pose source found nobody
pub const NO_SUBJECT_TEXT: &str = "No person detected.";

/// One line per displayed angle, e.g.
/// `Left Hip Angle: 92° [good] (Ideal: 90°)`.
///
/// Values are rounded to whole degrees for display.
#[must_use]
pub fn render_text(metrics: &FrameMetrics) -> String {
    if !metrics.detected {
        return NO_SUBJECT_TEXT.to_string();
    }

    metrics
        .metrics
        .iter()
        .map(|(name, metric)| {
            let mut line = match metric.value {
                AngleValue::Degrees(value) => format!("{}: {value:.0}° [{}]", name.label(), metric.severity),
                AngleValue::Unavailable => format!("{}: {UNAVAILABLE_TEXT}", name.label()),
            };
            if let Some(target) = &metric.target {
                line.push_str(&format!(" (Ideal: {})", target.describe()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
