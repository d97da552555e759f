//! Named joint angles derived from a landmark frame.

use crate::{
    constants::MAX_ANGLE_DEGREES,
    geometry::{angle3, angle_vs_vertical, midpoint, round_angle},
    landmarks::{validate, BodyLandmark, LandmarkFrame, Point2},
};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Text used for an angle that could not be measured
pub const UNAVAILABLE_TEXT: &str = "N/A";

/// Fixed reference point for the ground angles: the bottom-left image corner
pub const GROUND_REFERENCE: Point2 = Point2::new(0.0, 1.0);

/// A measured angle, or the fact that it could not be measured
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AngleValue {
    /// Degrees in `[0, 180]`
    Degrees(f64),
    /// Required landmarks were missing, invalid or coincident
    #[default]
    Unavailable,
}

impl AngleValue {
    /// Wrap a degree value, clamping it into `[0, 180]`.
    ///
    /// Non-finite input is reported as unavailable.
    #[must_use]
    pub fn degrees(value: f64) -> Self {
        if value.is_finite() {
            Self::Degrees(value.clamp(0.0, MAX_ANGLE_DEGREES))
        } else {
            Self::Unavailable
        }
    }

    #[must_use]
    pub const fn as_degrees(self) -> Option<f64> {
        match self {
            Self::Degrees(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Degrees(_))
    }

    /// Same value at reporting precision (two decimals)
    #[must_use]
    pub fn rounded(self) -> Self {
        match self {
            Self::Degrees(value) => Self::degrees(round_angle(value)),
            Self::Unavailable => Self::Unavailable,
        }
    }
}

impl fmt::Display for AngleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees(value) => write!(f, "{value:.2}°"),
            Self::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}

impl Serialize for AngleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Degrees(value) => serializer.serialize_f64(*value),
            Self::Unavailable => serializer.serialize_str(UNAVAILABLE_TEXT),
        }
    }
}

/// Body side of a lateral angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// How a named angle is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleDefinition {
    /// Lean of the shoulder midpoint over the hip midpoint against vertical
    TrunkLean,
    /// Joint angle at the middle landmark of a three-point chain
    Chain(BodyLandmark, BodyLandmark, BodyLandmark),
    /// Joint angle at the first landmark, measured from the ground reference
    Ground(BodyLandmark, BodyLandmark),
}

/// Every measurement the pipeline produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AngleName {
    #[serde(rename = "Trunk_Angle")]
    Trunk,

    #[serde(rename = "Left_Shoulder_Angle")]
    LeftShoulder,
    #[serde(rename = "Left_Elbow_Angle")]
    LeftElbow,
    #[serde(rename = "Left_Hip_Angle")]
    LeftHip,
    #[serde(rename = "Left_Knee_Angle")]
    LeftKnee,
    #[serde(rename = "Left_Ankle_Angle")]
    LeftAnkle,

    #[serde(rename = "Right_Shoulder_Angle")]
    RightShoulder,
    #[serde(rename = "Right_Elbow_Angle")]
    RightElbow,
    #[serde(rename = "Right_Hip_Angle")]
    RightHip,
    #[serde(rename = "Right_Knee_Angle")]
    RightKnee,
    #[serde(rename = "Right_Ankle_Angle")]
    RightAnkle,

    #[serde(rename = "Left_Shoulder_Ground_Angle")]
    LeftShoulderGround,
    #[serde(rename = "Left_Elbow_Ground_Angle")]
    LeftElbowGround,
    #[serde(rename = "Left_Hip_Ground_Angle")]
    LeftHipGround,
    #[serde(rename = "Left_Knee_Ground_Angle")]
    LeftKneeGround,
    #[serde(rename = "Left_Ankle_Ground_Angle")]
    LeftAnkleGround,

    #[serde(rename = "Right_Shoulder_Ground_Angle")]
    RightShoulderGround,
    #[serde(rename = "Right_Elbow_Ground_Angle")]
    RightElbowGround,
    #[serde(rename = "Right_Hip_Ground_Angle")]
    RightHipGround,
    #[serde(rename = "Right_Knee_Ground_Angle")]
    RightKneeGround,
    #[serde(rename = "Right_Ankle_Ground_Angle")]
    RightAnkleGround,
}

impl AngleName {
    /// All angles in output order
    pub const ALL: [Self; 21] = [
        Self::Trunk,
        Self::LeftShoulder,
        Self::LeftElbow,
        Self::LeftHip,
        Self::LeftKnee,
        Self::LeftAnkle,
        Self::RightShoulder,
        Self::RightElbow,
        Self::RightHip,
        Self::RightKnee,
        Self::RightAnkle,
        Self::LeftShoulderGround,
        Self::LeftElbowGround,
        Self::LeftHipGround,
        Self::LeftKneeGround,
        Self::LeftAnkleGround,
        Self::RightShoulderGround,
        Self::RightElbowGround,
        Self::RightHipGround,
        Self::RightKneeGround,
        Self::RightAnkleGround,
    ];

    /// Stable external key, e.g. `Left_Hip_Angle`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trunk => "Trunk_Angle",
            Self::LeftShoulder => "Left_Shoulder_Angle",
            Self::LeftElbow => "Left_Elbow_Angle",
            Self::LeftHip => "Left_Hip_Angle",
            Self::LeftKnee => "Left_Knee_Angle",
            Self::LeftAnkle => "Left_Ankle_Angle",
            Self::RightShoulder => "Right_Shoulder_Angle",
            Self::RightElbow => "Right_Elbow_Angle",
            Self::RightHip => "Right_Hip_Angle",
            Self::RightKnee => "Right_Knee_Angle",
            Self::RightAnkle => "Right_Ankle_Angle",
            Self::LeftShoulderGround => "Left_Shoulder_Ground_Angle",
            Self::LeftElbowGround => "Left_Elbow_Ground_Angle",
            Self::LeftHipGround => "Left_Hip_Ground_Angle",
            Self::LeftKneeGround => "Left_Knee_Ground_Angle",
            Self::LeftAnkleGround => "Left_Ankle_Ground_Angle",
            Self::RightShoulderGround => "Right_Shoulder_Ground_Angle",
            Self::RightElbowGround => "Right_Elbow_Ground_Angle",
            Self::RightHipGround => "Right_Hip_Ground_Angle",
            Self::RightKneeGround => "Right_Knee_Ground_Angle",
            Self::RightAnkleGround => "Right_Ankle_Ground_Angle",
        }
    }

    /// Human readable label, e.g. `Left Hip Angle`
    #[must_use]
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Side of the body this angle belongs to; `None` for the trunk
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Trunk => None,
            Self::LeftShoulder
            | Self::LeftElbow
            | Self::LeftHip
            | Self::LeftKnee
            | Self::LeftAnkle
            | Self::LeftShoulderGround
            | Self::LeftElbowGround
            | Self::LeftHipGround
            | Self::LeftKneeGround
            | Self::LeftAnkleGround => Some(Side::Left),
            _ => Some(Side::Right),
        }
    }

    /// Landmarks and method used to measure this angle
    #[must_use]
    pub const fn definition(self) -> AngleDefinition {
        use AngleDefinition::{Chain, Ground, TrunkLean};
        use BodyLandmark as L;

        match self {
            Self::Trunk => TrunkLean,
            Self::LeftShoulder => Chain(L::LeftHip, L::LeftShoulder, L::LeftElbow),
            Self::LeftElbow => Chain(L::LeftShoulder, L::LeftElbow, L::LeftWrist),
            Self::LeftHip => Chain(L::LeftShoulder, L::LeftHip, L::LeftKnee),
            Self::LeftKnee => Chain(L::LeftHip, L::LeftKnee, L::LeftAnkle),
            Self::LeftAnkle => Chain(L::LeftKnee, L::LeftAnkle, L::LeftFootIndex),
            Self::RightShoulder => Chain(L::RightHip, L::RightShoulder, L::RightElbow),
            Self::RightElbow => Chain(L::RightShoulder, L::RightElbow, L::RightWrist),
            Self::RightHip => Chain(L::RightShoulder, L::RightHip, L::RightKnee),
            Self::RightKnee => Chain(L::RightHip, L::RightKnee, L::RightAnkle),
            Self::RightAnkle => Chain(L::RightKnee, L::RightAnkle, L::RightFootIndex),
            Self::LeftShoulderGround => Ground(L::LeftShoulder, L::LeftHip),
            Self::LeftElbowGround => Ground(L::LeftElbow, L::LeftShoulder),
            Self::LeftHipGround => Ground(L::LeftHip, L::LeftKnee),
            Self::LeftKneeGround => Ground(L::LeftKnee, L::LeftAnkle),
            Self::LeftAnkleGround => Ground(L::LeftAnkle, L::LeftFootIndex),
            Self::RightShoulderGround => Ground(L::RightShoulder, L::RightHip),
            Self::RightElbowGround => Ground(L::RightElbow, L::RightShoulder),
            Self::RightHipGround => Ground(L::RightHip, L::RightKnee),
            Self::RightKneeGround => Ground(L::RightKnee, L::RightAnkle),
            Self::RightAnkleGround => Ground(L::RightAnkle, L::RightFootIndex),
        }
    }

    /// Landmark the angle is measured at, used to place feedback markers
    #[must_use]
    pub const fn vertex(self) -> Option<BodyLandmark> {
        match self.definition() {
            AngleDefinition::TrunkLean => None,
            AngleDefinition::Chain(_, vertex, _) | AngleDefinition::Ground(vertex, _) => Some(vertex),
        }
    }

    /// Measure this angle on `frame`
    #[must_use]
    pub fn measure(self, frame: &LandmarkFrame) -> AngleValue {
        let at = |which: BodyLandmark| validate(frame, which.index());
        match self.definition() {
            AngleDefinition::TrunkLean => angle_vs_vertical(
                midpoint(at(BodyLandmark::LeftShoulder), at(BodyLandmark::RightShoulder)),
                midpoint(at(BodyLandmark::LeftHip), at(BodyLandmark::RightHip)),
            ),
            AngleDefinition::Chain(a, b, c) => angle3(at(a), at(b), at(c)),
            AngleDefinition::Ground(joint, next) => angle3(Some(GROUND_REFERENCE), at(joint), at(next)),
        }
    }
}

impl fmt::Display for AngleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Angle values keyed by name
pub type AngleMap = BTreeMap<AngleName, AngleValue>;

/// Measure every named angle on `frame`.
///
/// Each angle is independent: a missing landmark only makes the angles
/// that need it unavailable.
#[must_use]
pub fn compute_angles(frame: &LandmarkFrame) -> AngleMap {
    AngleName::ALL
        .iter()
        .map(|&name| (name, name.measure(frame)))
        .collect()
}
