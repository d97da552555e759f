//! Laterality selection: which angles are shown and receive feedback.

use crate::{
    angles::{AngleMap, AngleName},
    classifier::{classify, Severity, TargetTable},
    Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the body the user is watching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Laterality {
    #[default]
    Left,
    Right,
    Both,
}

const LEFT: [AngleName; 4] = [AngleName::Trunk, AngleName::LeftHip, AngleName::LeftKnee, AngleName::LeftAnkle];

const RIGHT: [AngleName; 4] = [AngleName::Trunk, AngleName::RightHip, AngleName::RightKnee, AngleName::RightAnkle];

const BOTH: [AngleName; 7] = [
    AngleName::Trunk,
    AngleName::LeftHip,
    AngleName::LeftKnee,
    AngleName::LeftAnkle,
    AngleName::RightHip,
    AngleName::RightKnee,
    AngleName::RightAnkle,
];

/// Angles surfaced for `laterality`.
///
/// This only filters what is displayed; every angle is still computed
/// and smoothed so switching sides takes effect without a warm-up.
#[must_use]
pub const fn select_active(laterality: Laterality) -> &'static [AngleName] {
    match laterality {
        Laterality::Left => &LEFT,
        Laterality::Right => &RIGHT,
        Laterality::Both => &BOTH,
    }
}

impl FromStr for Laterality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            "both" | "all" => Ok(Self::Both),
            _ => Err(Error::InvalidInput(format!("Unknown side: {s} (expected left, right or both)"))),
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Both => "both",
        })
    }
}

/// Emphasis for one landmark in the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedbackMarker {
    /// Canonical landmark index the marker is drawn at
    pub index: usize,
    /// Angle the marker reports on
    pub angle: AngleName,
    pub severity: Severity,
}

/// Markers for the active angles that have a vertex landmark and a
/// classifiable value
#[must_use]
pub fn feedback_markers(angles: &AngleMap, laterality: Laterality, targets: &TargetTable) -> Vec<FeedbackMarker> {
    select_active(laterality)
        .iter()
        .filter_map(|&name| {
            let vertex = name.vertex()?;
            let value = angles.get(&name).copied().unwrap_or_default();
            let severity = classify(value, targets.get(&name));
            (severity != Severity::Unavailable).then_some(FeedbackMarker {
                index: vertex.index(),
                angle: name,
                severity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{angles::AngleValue, classifier::default_targets};

    #[test]
    fn test_active_sets() {
        assert_eq!(select_active(Laterality::Left).len(), 4);
        assert!(select_active(Laterality::Left).contains(&AngleName::LeftKnee));
        assert!(!select_active(Laterality::Left).contains(&AngleName::RightKnee));
        assert!(select_active(Laterality::Right).contains(&AngleName::RightHip));

        let both = select_active(Laterality::Both);
        for name in select_active(Laterality::Left).iter().chain(select_active(Laterality::Right)) {
            assert!(both.contains(name));
        }
        assert_eq!(both.iter().filter(|&&n| n == AngleName::Trunk).count(), 1);
    }

    #[test]
    fn test_parse() {
        assert_eq!("LEFT".parse::<Laterality>().unwrap(), Laterality::Left);
        assert_eq!("r".parse::<Laterality>().unwrap(), Laterality::Right);
        assert_eq!("both".parse::<Laterality>().unwrap(), Laterality::Both);
        assert!("middle".parse::<Laterality>().is_err());
        assert_eq!(Laterality::default(), Laterality::Left);
    }

    #[test]
    fn test_feedback_markers() {
        let angles: AngleMap = [
            (AngleName::Trunk, AngleValue::Degrees(5.0)),
            (AngleName::LeftHip, AngleValue::Degrees(93.0)),
            (AngleName::LeftKnee, AngleValue::Degrees(130.0)),
            (AngleName::LeftAnkle, AngleValue::Unavailable),
            (AngleName::RightKnee, AngleValue::Degrees(90.0)),
        ]
        .into_iter()
        .collect();

        let markers = feedback_markers(&angles, Laterality::Left, &default_targets());
        assert_eq!(
            markers,
            vec![
                FeedbackMarker {
                    index: 23,
                    angle: AngleName::LeftHip,
                    severity: Severity::Good
                },
                FeedbackMarker {
                    index: 25,
                    angle: AngleName::LeftKnee,
                    severity: Severity::Bad
                },
            ]
        );
    }
}
