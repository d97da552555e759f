//! Landmark data model and per-point validation.
//!
//! A pose source delivers, once per frame, up to 33 landmarks in the
//! canonical body topology (or nothing at all when no subject is
//! detected). Coordinates are normalized to `[0, 1]` in image space with
//! the origin at the top-left corner.

use crate::constants::NUM_BODY_LANDMARKS;
use serde::{Deserialize, Serialize};

/// Canonical body landmark indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    LeftMouth = 9,
    RightMouth = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    /// Position of this landmark in a frame
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Landmarks drawn as joints in the overlay
pub const RELEVANT_LANDMARKS: [BodyLandmark; 12] = [
    BodyLandmark::LeftShoulder,
    BodyLandmark::RightShoulder,
    BodyLandmark::LeftElbow,
    BodyLandmark::RightElbow,
    BodyLandmark::LeftWrist,
    BodyLandmark::RightWrist,
    BodyLandmark::LeftHip,
    BodyLandmark::RightHip,
    BodyLandmark::LeftKnee,
    BodyLandmark::RightKnee,
    BodyLandmark::LeftAnkle,
    BodyLandmark::RightAnkle,
];

/// Bones drawn in the overlay skeleton
pub const SKELETON_CONNECTIONS: [(BodyLandmark, BodyLandmark); 12] = [
    (BodyLandmark::LeftShoulder, BodyLandmark::LeftElbow),
    (BodyLandmark::LeftElbow, BodyLandmark::LeftWrist),
    (BodyLandmark::RightShoulder, BodyLandmark::RightElbow),
    (BodyLandmark::RightElbow, BodyLandmark::RightWrist),
    (BodyLandmark::LeftHip, BodyLandmark::LeftKnee),
    (BodyLandmark::LeftKnee, BodyLandmark::LeftAnkle),
    (BodyLandmark::RightHip, BodyLandmark::RightKnee),
    (BodyLandmark::RightKnee, BodyLandmark::RightAnkle),
    (BodyLandmark::LeftShoulder, BodyLandmark::LeftHip),
    (BodyLandmark::RightShoulder, BodyLandmark::RightHip),
    (BodyLandmark::LeftShoulder, BodyLandmark::RightShoulder),
    (BodyLandmark::LeftHip, BodyLandmark::RightHip),
];

/// A 2D point in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate, left to right
    pub x: f64,
    /// Vertical coordinate, top to bottom
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One tracked body keypoint as reported by the pose source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Relative depth; carried through smoothing but never used for angles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Model confidence that the point is visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Create a landmark with only image-plane coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// Attach a depth value
    #[must_use]
    pub const fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Attach a visibility score
    #[must_use]
    pub const fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Image-plane position
    #[must_use]
    pub const fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Landmarks of one subject for one frame, indexed by canonical index.
///
/// Slots may be empty; a frame built from the pose source usually has all
/// 33 slots filled while a validated or smoothed frame only keeps the
/// points that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    points: Vec<Option<Landmark>>,
}

impl LandmarkFrame {
    /// Empty frame with no landmarks
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a frame from densely ordered landmarks
    #[must_use]
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Self {
        Self {
            points: landmarks.into_iter().map(Some).collect(),
        }
    }

    /// Build a frame from slots that may be empty
    #[must_use]
    pub const fn from_slots(points: Vec<Option<Landmark>>) -> Self {
        Self { points }
    }

    /// Landmark at `index`, if present
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index).and_then(Option::as_ref)
    }

    /// Landmark for a named body point, if present
    #[must_use]
    pub fn landmark(&self, which: BodyLandmark) -> Option<&Landmark> {
        self.get(which.index())
    }

    /// Store a landmark at `index`, growing the frame as needed.
    ///
    /// Indices outside the body model are ignored; returns whether the
    /// landmark was stored.
    pub fn set(&mut self, index: usize, landmark: Landmark) -> bool {
        if index >= NUM_BODY_LANDMARKS {
            return false;
        }
        if index >= self.points.len() {
            self.points.resize(index + 1, None);
        }
        self.points[index] = Some(landmark);
        true
    }

    /// Iterate over present landmarks with their canonical index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Landmark)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, lm)| lm.as_ref().map(|lm| (i, lm)))
    }

    /// Canonical indices of present landmarks, ascending
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.iter().map(|(i, _)| i).collect()
    }

    /// Number of present landmarks
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when no landmark is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Option::is_none)
    }

    /// Number of slots, present or not
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.points.len()
    }
}

/// Extra acceptance rules applied on top of the coordinate range check
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Reject landmarks whose reported visibility falls below this value.
    /// Landmarks that carry no visibility are not affected.
    pub min_visibility: Option<f64>,
}

/// True when both coordinates lie inside the unit square
#[must_use]
pub fn is_valid(landmark: &Landmark) -> bool {
    (0.0..=1.0).contains(&landmark.x) && (0.0..=1.0).contains(&landmark.y)
}

fn passes(landmark: &Landmark, rules: &ValidationRules) -> bool {
    if !is_valid(landmark) {
        return false;
    }
    match (rules.min_visibility, landmark.visibility) {
        (Some(min), Some(visibility)) => visibility >= min,
        _ => true,
    }
}

/// Position of the landmark at `index` if it exists and is valid
#[must_use]
pub fn validate(frame: &LandmarkFrame, index: usize) -> Option<Point2> {
    frame.get(index).filter(|lm| is_valid(lm)).map(Landmark::point)
}

/// Copy of `frame` keeping only landmarks accepted by `rules`
#[must_use]
pub fn validate_frame(frame: &LandmarkFrame, rules: &ValidationRules) -> LandmarkFrame {
    let points = (0..frame.slot_count().min(NUM_BODY_LANDMARKS))
        .map(|i| frame.get(i).filter(|lm| passes(lm, rules)).copied())
        .collect();
    LandmarkFrame::from_slots(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        let frame = LandmarkFrame::from_landmarks(vec![
            Landmark::new(0.0, 0.0),
            Landmark::new(1.0, 1.0),
            Landmark::new(1.01, 0.5),
            Landmark::new(0.5, -0.01),
            Landmark::new(f64::NAN, 0.5),
        ]);

        assert_eq!(validate(&frame, 0), Some(Point2::new(0.0, 0.0)));
        assert_eq!(validate(&frame, 1), Some(Point2::new(1.0, 1.0)));
        assert_eq!(validate(&frame, 2), None);
        assert_eq!(validate(&frame, 3), None);
        assert_eq!(validate(&frame, 4), None);
        // Out of range index
        assert_eq!(validate(&frame, 20), None);
    }

    #[test]
    fn test_validate_frame_preserves_indices() {
        let mut frame = LandmarkFrame::new();
        frame.set(11, Landmark::new(0.4, 0.3));
        frame.set(12, Landmark::new(1.4, 0.3));
        frame.set(23, Landmark::new(0.4, 0.6));

        let valid = validate_frame(&frame, &ValidationRules::default());
        assert_eq!(valid.indices(), vec![11, 23]);
        assert_eq!(valid.landmark(BodyLandmark::LeftHip), frame.get(23));
    }

    #[test]
    fn test_set_outside_body_model() {
        let mut frame = LandmarkFrame::new();
        assert!(frame.set(32, Landmark::new(0.5, 0.5)));
        assert!(!frame.set(NUM_BODY_LANDMARKS, Landmark::new(0.5, 0.5)));
        assert!(!frame.set(usize::MAX, Landmark::new(0.5, 0.5)));
        assert_eq!(frame.slot_count(), NUM_BODY_LANDMARKS);
        assert_eq!(frame.indices(), vec![32]);
    }

    #[test]
    fn test_min_visibility() {
        let mut frame = LandmarkFrame::new();
        frame.set(11, Landmark::new(0.4, 0.3).with_visibility(0.2));
        frame.set(12, Landmark::new(0.6, 0.3).with_visibility(0.9));
        frame.set(13, Landmark::new(0.6, 0.5));

        let rules = ValidationRules {
            min_visibility: Some(0.5),
        };
        let valid = validate_frame(&frame, &rules);
        assert_eq!(valid.indices(), vec![12, 13]);
    }

    #[test]
    fn test_frame_deserializes_with_nulls() {
        let json = r#"[{"x":0.1,"y":0.2,"z":-0.3,"visibility":0.99},null,{"x":0.5,"y":0.5}]"#;
        let frame: LandmarkFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.slot_count(), 3);
        assert_eq!(frame.indices(), vec![0, 2]);
        assert_eq!(frame.get(0).unwrap().z, Some(-0.3));
        assert_eq!(frame.get(2).unwrap().visibility, None);
    }

    #[test]
    fn test_body_landmark_indices() {
        assert_eq!(BodyLandmark::LeftShoulder.index(), 11);
        assert_eq!(BodyLandmark::RightFootIndex.index(), 32);
    }
}
