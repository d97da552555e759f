//! Constants used throughout the library

/// Number of landmarks in the canonical body topology
pub const NUM_BODY_LANDMARKS: usize = 33;

/// Default EMA weight for landmark coordinates (lower = smoother, more lag)
pub const DEFAULT_LANDMARK_ALPHA: f64 = 0.4;

/// Default EMA weight for derived angles (higher = faster response)
pub const DEFAULT_ANGLE_ALPHA: f64 = 0.9;

/// Exponential filter bounds
pub const EXPONENTIAL_ALPHA_MIN: f64 = 0.0;
pub const EXPONENTIAL_ALPHA_MAX: f64 = 1.0;

/// Default point-target thresholds in degrees
pub const DEFAULT_GOOD_THRESHOLD: f64 = 5.0;
pub const DEFAULT_WARN_THRESHOLD: f64 = 10.0;

/// Default ideal joint angle for hips, knees and ankles
pub const DEFAULT_IDEAL_JOINT_ANGLE: f64 = 90.0;

/// Default acceptable trunk lean band in degrees from vertical
pub const DEFAULT_TRUNK_MIN: f64 = 0.0;
pub const DEFAULT_TRUNK_MAX: f64 = 30.0;

/// Fraction of the range width a value may overshoot and still be a warning
pub const DEFAULT_WARN_FRACTION: f64 = 0.2;

/// Floor applied to range widths before dividing
pub const RANGE_WIDTH_EPSILON: f64 = 1e-6;

/// Angles are reported with this many decimal places
pub const ANGLE_DECIMALS: i32 = 2;

/// Upper bound of any reported angle
pub const MAX_ANGLE_DEGREES: f64 = 180.0;

/// Numeric precision epsilon for vector magnitudes
pub const EPSILON: f64 = 1e-12;
