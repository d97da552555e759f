//! Severity classification of measured angles against configured targets.

use crate::{
    angles::{AngleName, AngleValue},
    constants::{
        DEFAULT_GOOD_THRESHOLD, DEFAULT_IDEAL_JOINT_ANGLE, DEFAULT_TRUNK_MAX, DEFAULT_TRUNK_MIN,
        DEFAULT_WARN_FRACTION, DEFAULT_WARN_THRESHOLD, RANGE_WIDTH_EPSILON,
    },
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Classification tier, ordered by increasing concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Warn,
    Bad,
    Unavailable,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warn => "warn",
            Self::Bad => "bad",
            Self::Unavailable => "na",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a good value looks like for one angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngleTarget {
    /// A single ideal value with symmetric distance thresholds
    Point {
        /// Ideal angle in degrees
        ideal: f64,
        /// Largest deviation still classed as good
        #[serde(default = "default_good")]
        good: f64,
        /// Largest deviation still classed as a warning
        #[serde(default = "default_warn")]
        warn: f64,
    },
    /// An inclusive ideal band; overshoot is measured relative to its width
    Range {
        min: f64,
        max: f64,
        /// Largest overshoot, as a fraction of the width, still classed as a warning
        #[serde(default = "default_warn_fraction")]
        warn_fraction: f64,
    },
}

const fn default_good() -> f64 {
    DEFAULT_GOOD_THRESHOLD
}

const fn default_warn() -> f64 {
    DEFAULT_WARN_THRESHOLD
}

const fn default_warn_fraction() -> f64 {
    DEFAULT_WARN_FRACTION
}

impl AngleTarget {
    /// Point target with the default 5°/10° thresholds
    #[must_use]
    pub const fn point(ideal: f64) -> Self {
        Self::Point {
            ideal,
            good: DEFAULT_GOOD_THRESHOLD,
            warn: DEFAULT_WARN_THRESHOLD,
        }
    }

    /// Range target with the default 20% warning band
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self::Range {
            min,
            max,
            warn_fraction: DEFAULT_WARN_FRACTION,
        }
    }

    /// Short description of the ideal, e.g. `90°` or `140–150°`
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Point { ideal, .. } => format!("{ideal}°"),
            Self::Range { min, max, .. } => format!("{min}–{max}°"),
        }
    }
}

/// Configured targets keyed by angle name
pub type TargetTable = BTreeMap<AngleName, AngleTarget>;

/// Targets used when nothing else is configured: a 90° ideal for hips,
/// knees and ankles and an upright trunk band.
#[must_use]
pub fn default_targets() -> TargetTable {
    let mut targets: TargetTable = [
        AngleName::LeftHip,
        AngleName::LeftKnee,
        AngleName::LeftAnkle,
        AngleName::RightHip,
        AngleName::RightKnee,
        AngleName::RightAnkle,
    ]
    .into_iter()
    .map(|name| (name, AngleTarget::point(DEFAULT_IDEAL_JOINT_ANGLE)))
    .collect();
    targets.insert(AngleName::Trunk, AngleTarget::range(DEFAULT_TRUNK_MIN, DEFAULT_TRUNK_MAX));
    targets
}

/// Classify a measured value against its target.
///
/// Unavailable values and unconfigured angles are always `Unavailable`.
#[must_use]
pub fn classify(value: AngleValue, target: Option<&AngleTarget>) -> Severity {
    let (AngleValue::Degrees(value), Some(target)) = (value, target) else {
        return Severity::Unavailable;
    };
    match *target {
        AngleTarget::Point { ideal, good, warn } => {
            let deviation = (value - ideal).abs();
            if deviation <= good {
                Severity::Good
            } else if deviation <= warn {
                Severity::Warn
            } else {
                Severity::Bad
            }
        }
        AngleTarget::Range { min, max, warn_fraction } => {
            if (min..=max).contains(&value) {
                return Severity::Good;
            }
            let deviation = if value < min { min - value } else { value - max };
            let width = (max - min).max(RANGE_WIDTH_EPSILON);
            if deviation / width <= warn_fraction {
                Severity::Warn
            } else {
                Severity::Bad
            }
        }
    }
}
