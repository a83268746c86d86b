//! Placement of the next stone on top of the previous one.
//!
//! Everything here is value composition: the previous stone is read, never
//! mutated, and the resulting [`AnchoredTrapezoid`] is a `Copy` snapshot
//! that the new stone keeps for itself.

use serde::{Deserialize, Serialize};

use crate::core::math::Point;

use super::trapezoid::TrapezoidMetrics;

/// Rigid placement: translation then rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Point,
    pub rotation: f32,
}

impl Transform {
    pub fn new(translation: Point, rotation: f32) -> Self {
        Self { translation, rotation }
    }
}

/// Anchor transform plus the metrics of the stone placed on it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchoredTrapezoid {
    pub transform: Transform,
    pub metrics: TrapezoidMetrics,
}

impl AnchoredTrapezoid {
    pub fn new(transform: Transform, metrics: TrapezoidMetrics) -> Self {
        Self { transform, metrics }
    }

    /// Body origin (centroid) that puts this stone's bottom mid-edge on the
    /// anchor translation.
    pub fn body_origin(&self) -> Point {
        self.transform.translation - self.metrics.bottom_mid_world
    }

    /// World top mid-edge when the body sits at `origin` with zero rotation.
    pub fn top_mid_at(&self, origin: Point) -> Point {
        origin + self.metrics.top_mid_world
    }
}

/// Anchor for the stone that goes on top of `prev`.
///
/// `prev_body` is the previous body's current world transform (centroid
/// position and body rotation). Its top mid-edge in world space is
/// `prev_body.translation + rotate(prev.top_mid_world, prev_body.rotation)`
/// and its top face angle is `prev.top_angle_world + prev_body.rotation`.
pub fn anchor_next(prev: &TrapezoidMetrics, prev_body: Transform, stack_offset: Point) -> Transform {
    Transform {
        translation: prev_body.translation
            + prev.top_mid_world.rotate(prev_body.rotation)
            + stack_offset,
        rotation: prev.top_angle_world + prev_body.rotation,
    }
}

/// Anchor for the first stone, resting on flat ground at `ground_top`.
pub fn ground_anchor(ground_top: f32, x: f32) -> Transform {
    Transform {
        translation: Point::new(x, ground_top),
        rotation: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_trapezoid, TrapezoidGeometry, TrapezoidParams};

    #[test]
    fn next_stone_bottom_meets_previous_top() {
        let first = build_trapezoid(&TrapezoidParams::new(
            TrapezoidGeometry::new(100.0, 50.0, 0.3, 0.2),
            0.0,
            0.12,
            0.0,
        ));
        let first_anchor = AnchoredTrapezoid::new(ground_anchor(0.0, 0.0), first.metrics);
        let first_origin = first_anchor.body_origin();
        assert!((first_origin.y - 25.0).abs() < 2.0);

        let t = anchor_next(&first.metrics, Transform::new(first_origin, 0.0), Point::ZERO);
        assert!((t.rotation - first.metrics.top_angle_world).abs() < 1e-6);

        let second = build_trapezoid(&TrapezoidParams::new(
            TrapezoidGeometry::new(80.0, 40.0, 0.0, 0.0),
            0.0,
            0.0,
            t.rotation,
        ));
        let anchored = AnchoredTrapezoid::new(t, second.metrics);
        let origin = anchored.body_origin();
        let bottom = origin + second.metrics.bottom_mid_world;
        let prev_top = first_anchor.top_mid_at(first_origin);
        assert!(bottom.distance(prev_top) < 1e-3);
        assert!((second.metrics.bottom_angle_world - first.metrics.top_angle_world).abs() < 1e-5);
    }

    #[test]
    fn stack_offset_shifts_translation() {
        let m = TrapezoidMetrics {
            top_mid_world: Point::new(0.0, 10.0),
            ..TrapezoidMetrics::default()
        };
        let t = anchor_next(&m, Transform::new(Point::new(5.0, 5.0), 0.0), Point::new(1.0, 2.0));
        assert_eq!(t.translation, Point::new(6.0, 17.0));
    }

    #[test]
    fn rotated_previous_body_carries_its_rotation() {
        let m = TrapezoidMetrics {
            top_mid_world: Point::new(0.0, 10.0),
            top_angle_world: 0.1,
            ..TrapezoidMetrics::default()
        };
        let t = anchor_next(&m, Transform::new(Point::ZERO, std::f32::consts::FRAC_PI_2), Point::ZERO);
        assert!((t.translation.x + 10.0).abs() < 1e-4);
        assert!(t.translation.y.abs() < 1e-4);
        assert!((t.rotation - (0.1 + std::f32::consts::FRAC_PI_2)).abs() < 1e-6);
    }
}
