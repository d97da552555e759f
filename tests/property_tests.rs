//! Property tests for the geometric, smoothing and classification invariants

use pose_metrics::{
    angles::{AngleMap, AngleName, AngleValue},
    classifier::{classify, AngleTarget},
    filters::{AngleSmoother, ExponentialFilter, FrameFilter, LandmarkSmoother},
    geometry::{angle3, angle_vs_vertical},
    landmarks::{Landmark, LandmarkFrame, Point2},
    pipeline::{process_frame, PipelineSettings, SmoothingState},
    side::Laterality,
};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point2> {
    (0.0f64..1.0, 0.0f64..1.0).prop_map(|(x, y)| Point2::new(x, y))
}

fn distance(a: Point2, b: Point2) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

fn rigid(p: Point2, theta: f64, dx: f64, dy: f64) -> Point2 {
    let (s, c) = theta.sin_cos();
    Point2::new(c.mul_add(p.x, -s * p.y) + dx, s.mul_add(p.x, c * p.y) + dy)
}

proptest! {
    #[test]
    fn prop_coincident_points_are_unavailable(a in point(), c in point()) {
        prop_assert_eq!(angle3(Some(a), Some(a), Some(c)), AngleValue::Unavailable);
        prop_assert_eq!(angle3(Some(a), Some(c), Some(c)), AngleValue::Unavailable);
    }

    #[test]
    fn prop_angle3_in_range(a in point(), b in point(), c in point()) {
        if let AngleValue::Degrees(value) = angle3(Some(a), Some(b), Some(c)) {
            prop_assert!((0.0..=180.0).contains(&value));
        }
    }

    #[test]
    fn prop_angle3_rigid_motion_invariant(
        a in point(),
        b in point(),
        c in point(),
        theta in -std::f64::consts::PI..std::f64::consts::PI,
        dx in -1.0f64..1.0,
        dy in -1.0f64..1.0,
    ) {
        prop_assume!(distance(a, b) > 1e-3 && distance(b, c) > 1e-3);

        let before = angle3(Some(a), Some(b), Some(c)).as_degrees().unwrap();
        let after = angle3(
            Some(rigid(a, theta, dx, dy)),
            Some(rigid(b, theta, dx, dy)),
            Some(rigid(c, theta, dx, dy)),
        )
        .as_degrees()
        .unwrap();
        // Both values are rounded to 0.01°, so allow one rounding step
        prop_assert!((before - after).abs() <= 0.0101, "{} vs {}", before, after);
    }

    #[test]
    fn prop_upright_segment_is_zero(x in 0.0f64..1.0, base_y in 0.01f64..1.0, height in 0.001f64..1.0) {
        let tip = Point2::new(x, (base_y - height).max(0.0));
        prop_assume!(tip.y < base_y);
        let angle = angle_vs_vertical(Some(tip), Some(Point2::new(x, base_y)));
        prop_assert_eq!(angle, AngleValue::Degrees(0.0));
    }

    #[test]
    fn prop_ema_converges(alpha in 0.05f64..=1.0, start in -100.0f64..100.0, target in -100.0f64..100.0) {
        let filter = ExponentialFilter::new(alpha);
        let mut value = filter.step(None, start);
        for _ in 0..2000 {
            value = filter.step(Some(value), target);
        }
        prop_assert!((value - target).abs() < 1e-6);
    }

    #[test]
    fn prop_landmark_steady_state(x in 0.0f64..=1.0, y in 0.0f64..=1.0, alpha in 0.01f64..=1.0) {
        let smoother = LandmarkSmoother::new(alpha);
        let frame = LandmarkFrame::from_landmarks(vec![Landmark::new(x, y); 3]);
        let state = smoother.apply(&LandmarkFrame::new(), Some(&frame));
        let state = smoother.apply(&state, Some(&frame));
        prop_assert_eq!(state, frame);
    }

    #[test]
    fn prop_range_severity_monotonic(
        min in 0.0f64..170.0,
        width in 0.0f64..60.0,
        d1 in 0.0f64..90.0,
        d2 in 0.0f64..90.0,
        above in any::<bool>(),
    ) {
        let max = min + width;
        let target = AngleTarget::range(min, max);
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let at = |d: f64| if above { max + d } else { min - d };

        let near_severity = classify(AngleValue::Degrees(at(near)), Some(&target));
        let far_severity = classify(AngleValue::Degrees(at(far)), Some(&target));
        prop_assert!(near_severity <= far_severity);
    }

    #[test]
    fn prop_point_severity_monotonic(ideal in 0.0f64..180.0, d1 in 0.0f64..90.0, d2 in 0.0f64..90.0) {
        let target = AngleTarget::point(ideal);
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        prop_assert!(
            classify(AngleValue::Degrees(ideal + near), Some(&target))
                <= classify(AngleValue::Degrees(ideal + far), Some(&target))
        );
    }

    #[test]
    fn prop_pipeline_is_total(
        coords in proptest::collection::vec((-0.5f64..1.5, -0.5f64..1.5), 0..40),
        side in prop_oneof![Just(Laterality::Left), Just(Laterality::Right), Just(Laterality::Both)],
    ) {
        let frame = LandmarkFrame::from_landmarks(coords.iter().map(|&(x, y)| Landmark::new(x, y)).collect());
        let settings = PipelineSettings::default();
        let (_, state) = process_frame(Some(&frame), &SmoothingState::default(), side, &settings);
        let (metrics, state) = process_frame(Some(&frame), &state, side, &settings);

        for metric in metrics.metrics.values() {
            if let AngleValue::Degrees(value) = metric.value {
                prop_assert!((0.0..=180.0).contains(&value));
            }
        }
        // Smoothed landmarks only ever contain validated points
        for (_, lm) in state.landmarks.iter() {
            prop_assert!((0.0..=1.0).contains(&lm.x) && (0.0..=1.0).contains(&lm.y));
        }
        let keys: Vec<AngleName> = state.angles.keys().copied().collect();
        prop_assert!(state.angles.is_empty() || keys == AngleName::ALL.to_vec());
    }
}

proptest! {
    #[test]
    fn prop_angle_smoother_converges(alpha in 0.01f64..=1.0, start in 0.0f64..=180.0, target in 0.0f64..=180.0) {
        let smoother = AngleSmoother::new(alpha);
        let input: AngleMap = [(AngleName::LeftKnee, AngleValue::Degrees(target))].into_iter().collect();
        let mut state: AngleMap = [(AngleName::LeftKnee, AngleValue::Degrees(start))].into_iter().collect();
        for _ in 0..5000 {
            state = smoother.apply(&state, Some(&input));
        }
        let value = state[&AngleName::LeftKnee].as_degrees().unwrap();
        prop_assert!((value - target).abs() < 0.01, "{} vs {}", value, target);
    }
}
