// src/geometry.rs
use nalgebra::Vector3;

use crate::landmarks::{FingerName, HandLandmarkSet, MIDDLE_MCP, WRIST};

/// Edge vectors shorter than this carry no usable direction.
pub const MIN_EDGE_NORM: f64 = 1e-6;

/// Added to the hand size so it can always be used as a divisor.
pub const HAND_SIZE_EPSILON: f64 = 1e-6;

/// Angle ABC in degrees, measured at `b` between the rays `b->a` and `b->c`.
///
/// Returns `0.0` when either edge is shorter than [`MIN_EDGE_NORM`]; noisy
/// landmarks can put two joints almost on top of each other and that must not
/// take down the frame loop. The result is otherwise always in `[0, 180]`.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    let v1 = a - b;
    let v2 = c - b;

    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 < MIN_EDGE_NORM || n2 < MIN_EDGE_NORM {
        tracing::trace!(n1, n2, "degenerate edge in angle computation");
        return 0.0;
    }

    // Scale by the largest component so huge coordinates cannot overflow
    // the norm.
    let u1 = v1 / v1.amax();
    let u2 = v2 / v2.amax();
    let cos_angle = u1.dot(&u2) / (u1.norm() * u2.norm());
    if !cos_angle.is_finite() {
        tracing::trace!(n1, n2, "non-finite cosine in angle computation");
        return 0.0;
    }

    // dot/(n1*n2) can land a hair outside [-1, 1]
    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Joint angle of one finger, measured at its pivot joint.
pub fn finger_angle(hand: &HandLandmarkSet, finger: FingerName) -> f64 {
    let joints = finger.joint_triple();
    angle_between(
        hand.point(joints.proximal),
        hand.point(joints.pivot),
        hand.point(joints.tip),
    )
}

/// Wrist to middle-finger MCP distance, a rough scale for the hand.
pub fn estimate_hand_size(hand: &HandLandmarkSet) -> f64 {
    (hand.point(MIDDLE_MCP) - hand.point(WRIST)).norm() + HAND_SIZE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::HAND_LANDMARK_COUNT;

    fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }

    #[test]
    fn collinear_points_are_straight() {
        let angle = angle_between(&v(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v(2.0, 0.0, 0.0));
        assert!((angle - 180.0).abs() < 1e-3);

        let angle = angle_between(&v(0.1, 0.2, 0.3), &v(0.2, 0.4, 0.6), &v(0.5, 1.0, 1.5));
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn huge_coordinates_keep_their_angle() {
        let straight = angle_between(&v(0.0, 0.0, 0.0), &v(1e200, 0.0, 0.0), &v(2e200, 0.0, 0.0));
        assert!((straight - 180.0).abs() < 1e-3);

        let right = angle_between(&v(1e200, 0.0, 0.0), &v(0.0, 0.0, 0.0), &v(0.0, 1e200, 0.0));
        assert!((right - 90.0).abs() < 1e-9);

        // the edge itself overflows to infinity
        let overflow = angle_between(&v(1.7e308, 0.0, 0.0), &v(-1.7e308, 0.0, 0.0), &v(0.0, 1.0, 0.0));
        assert_eq!(overflow, 0.0);
    }

    #[test]
    fn right_angle() {
        let angle = angle_between(&v(1.0, 0.0, 0.0), &v(0.0, 0.0, 0.0), &v(0.0, 1.0, 0.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn folded_back_is_zero() {
        let angle = angle_between(&v(1.0, 0.0, 0.0), &v(0.0, 0.0, 0.0), &v(2.0, 0.0, 0.0));
        assert!(angle.abs() < 1e-6);
    }

    #[test]
    fn zero_length_edge_returns_exactly_zero() {
        let b = v(0.3, 0.3, 0.0);
        assert_eq!(angle_between(&b, &b, &v(0.0, 1.0, 0.0)), 0.0);
        assert_eq!(angle_between(&v(0.0, 1.0, 0.0), &b, &b), 0.0);
        assert_eq!(angle_between(&b, &b, &b), 0.0);

        let nearly_b = v(0.3 + 1e-8, 0.3, 0.0);
        assert_eq!(angle_between(&nearly_b, &b, &v(0.0, 1.0, 0.0)), 0.0);
    }

    #[test]
    fn output_stays_in_range() {
        let b = v(0.5, 0.5, 0.1);
        let samples = [
            v(0.9, 0.1, -0.3),
            v(0.0, 0.0, 0.0),
            v(0.5, 0.9, 0.1),
            v(0.51, 0.5, 0.1),
            v(-3.0, 2.0, 7.0),
            v(1e3, -1e3, 1e-3),
            v(1e200, 0.0, 0.0),
            v(-2e200, 1e200, 3e199),
            v(1.5e308, -1.5e308, 0.0),
        ];
        for a in &samples {
            for c in &samples {
                let angle = angle_between(a, &b, c);
                assert!(angle.is_finite());
                assert!((0.0..=180.0).contains(&angle), "angle {} out of range", angle);
            }
        }
    }

    #[test]
    fn hand_size_is_wrist_to_middle_mcp() {
        let mut points = [Vector3::zeros(); HAND_LANDMARK_COUNT];
        points[WRIST] = v(0.5, 0.9, 0.0);
        points[MIDDLE_MCP] = v(0.5, 0.6, 0.0);
        let size = estimate_hand_size(&HandLandmarkSet::new(points).unwrap());
        assert!((size - 0.3).abs() < 1e-5);

        let collapsed = HandLandmarkSet::new([Vector3::zeros(); HAND_LANDMARK_COUNT]).unwrap();
        assert!(estimate_hand_size(&collapsed) > 0.0);
    }
}
