//! Planar angle measurements on normalized landmark positions.
//!
//! All functions are pure. Missing inputs and zero-length vectors produce
//! [`AngleValue::Unavailable`] instead of an error.

use crate::{
    angles::AngleValue,
    constants::{ANGLE_DECIMALS, EPSILON, MAX_ANGLE_DEGREES},
    landmarks::Point2,
};

/// "Up" in image coordinates, where y grows downwards
const UP: (f64, f64) = (0.0, -1.0);

/// Round to the precision angles are reported with
#[must_use]
pub fn round_angle(value: f64) -> f64 {
    let scale = 10f64.powi(ANGLE_DECIMALS);
    (value * scale).round() / scale
}

fn vector(from: Point2, to: Point2) -> (f64, f64) {
    (to.x - from.x, to.y - from.y)
}

fn magnitude(v: (f64, f64)) -> f64 {
    v.0.hypot(v.1)
}

/// Angle in degrees between two vectors, or `None` if either is degenerate
fn angle_between(u: (f64, f64), v: (f64, f64)) -> Option<f64> {
    let (mu, mv) = (magnitude(u), magnitude(v));
    if !(mu > EPSILON && mv > EPSILON) {
        return None;
    }
    let cos = (u.0.mul_add(v.0, u.1 * v.1) / (mu * mv)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Joint angle at `b` for the chain `a → b → c`.
///
/// Measured as `180° − ∠(ab, bc)` so a fully extended joint reads close
/// to 180° and the value shrinks as the joint flexes.
#[must_use]
pub fn angle3(a: Option<Point2>, b: Option<Point2>, c: Option<Point2>) -> AngleValue {
    let (Some(a), Some(b), Some(c)) = (a, b, c) else {
        return AngleValue::Unavailable;
    };
    angle_between(vector(a, b), vector(b, c)).map_or(AngleValue::Unavailable, |raw| {
        AngleValue::degrees(round_angle(MAX_ANGLE_DEGREES - raw))
    })
}

/// Angle between `tip − base` and image-space vertical.
///
/// An upright segment (tip directly above base) reads 0°; leaning in
/// any direction increases the value up to 180° for a segment pointing
/// straight down.
#[must_use]
pub fn angle_vs_vertical(tip: Option<Point2>, base: Option<Point2>) -> AngleValue {
    let (Some(tip), Some(base)) = (tip, base) else {
        return AngleValue::Unavailable;
    };
    angle_between(vector(base, tip), UP)
        .map_or(AngleValue::Unavailable, |raw| AngleValue::degrees(round_angle(raw)))
}

/// Arithmetic mean of two points
#[must_use]
pub fn midpoint(p: Option<Point2>, q: Option<Point2>) -> Option<Point2> {
    let (p, q) = (p?, q?);
    Some(Point2::new((p.x + q.x) / 2.0, (p.y + q.y) / 2.0))
}
