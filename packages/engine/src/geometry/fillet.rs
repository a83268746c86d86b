//! Rounded-corner pass over a convex polygon.
//!
//! Each sharp corner is replaced by an arc tangent to both adjacent edges.
//! The radius is clamped per corner so that the two fillets sharing an edge
//! can never overlap; corners with degenerate edges or angles are passed
//! through unchanged.

use std::f32::consts::PI;

use crate::core::math::{angle_delta, Point, EPSILON};

/// Interior angles closer than this to 0 or π are left sharp.
const MIN_TURN: f32 = 1e-3;

/// Output of [`fillet_polygon`].
#[derive(Clone, Debug)]
pub struct Filleted {
    pub points: Vec<Point>,
    /// Effective radius used at each input corner (0 when left sharp).
    pub radii: Vec<f32>,
}

/// Interior angle at `cur` between the edges toward `prev` and `next`,
/// together with the two edge lengths.
pub fn corner_angle(prev: Point, cur: Point, next: Point) -> (f32, f32, f32) {
    let e1 = prev - cur;
    let e2 = next - cur;
    let l1 = e1.length();
    let l2 = e2.length();
    if l1 < EPSILON || l2 < EPSILON {
        return (0.0, l1, l2);
    }
    let cos_t = (e1.dot(e2) / (l1 * l2)).clamp(-1.0, 1.0);
    (cos_t.acos(), l1, l2)
}

/// Largest radius a corner can carry without the fillets on either
/// adjacent edge meeting.
pub fn corner_radius_limit(prev: Point, cur: Point, next: Point) -> f32 {
    let (theta, l1, l2) = corner_angle(prev, cur, next);
    if theta < MIN_TURN || theta > PI - MIN_TURN {
        return 0.0;
    }
    0.5 * l1.min(l2) * (theta * 0.5).tan()
}

/// Replace every corner of `corners` by `segments + 1` arc points.
pub fn fillet_polygon(corners: &[Point], radius: f32, segments: u32) -> Filleted {
    let n = corners.len();
    let segments = segments.max(1);
    let mut points = Vec::with_capacity(n * (segments as usize + 1));
    let mut radii = vec![0.0f32; n];

    if n < 3 || !(radius > EPSILON) {
        points.extend_from_slice(corners);
        return Filleted { points, radii };
    }

    for i in 0..n {
        let prev = corners[(i + n - 1) % n];
        let cur = corners[i];
        let next = corners[(i + 1) % n];

        match fillet_corner(prev, cur, next, radius, segments, &mut points) {
            Some(r) => radii[i] = r,
            None => points.push(cur),
        }
    }

    Filleted { points, radii }
}

fn fillet_corner(
    prev: Point,
    cur: Point,
    next: Point,
    radius: f32,
    segments: u32,
    out: &mut Vec<Point>,
) -> Option<f32> {
    let (theta, l1, l2) = corner_angle(prev, cur, next);
    if theta < MIN_TURN || theta > PI - MIN_TURN {
        return None;
    }

    let half = theta * 0.5;
    let tan_half = half.tan();
    let r = radius.min(0.5 * l1.min(l2) * tan_half);
    if !(r > EPSILON) {
        return None;
    }

    let u1 = (prev - cur).normalize();
    let u2 = (next - cur).normalize();
    let bisector = (u1 + u2).normalize();
    if bisector.is_zero() {
        return None;
    }

    let tangent = r / tan_half;
    let t1 = cur + u1 * tangent;
    let t2 = cur + u2 * tangent;
    let center = cur + bisector * (r / half.sin());

    let a1 = (t1 - center).angle();
    let a2 = (t2 - center).angle();
    let sweep = angle_delta(a1, a2);

    out.push(t1);
    for s in 1..segments {
        let a = a1 + sweep * (s as f32 / segments as f32);
        out.push(center + Point::new(a.cos(), a.sin()) * r);
    }
    out.push(t2);

    Some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn zero_radius_passes_corners_through() {
        let out = fillet_polygon(&square(), 0.0, 4);
        assert_eq!(out.points, square());
    }

    #[test]
    fn each_corner_emits_segments_plus_one_points() {
        let out = fillet_polygon(&square(), 2.0, 4);
        assert_eq!(out.points.len(), 4 * 5);
        for r in &out.radii {
            assert!((r - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn arc_points_sit_on_the_fillet_circle() {
        let out = fillet_polygon(&square(), 2.0, 4);
        // First corner (0,0) has its arc center at (2,2).
        for p in &out.points[0..5] {
            assert!((p.distance(Point::new(2.0, 2.0)) - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn oversized_radius_is_clamped() {
        let out = fillet_polygon(&square(), 100.0, 3);
        // Right angle: limit = 0.5 * 10 * tan(45°) = 5.
        for r in &out.radii {
            assert!(*r <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn duplicate_vertex_is_not_filleted() {
        let mut pts = square();
        pts.insert(1, Point::new(0.0, 0.0));
        let out = fillet_polygon(&pts, 1.0, 2);
        assert!(out.points.iter().all(|p| p.is_finite()));
        assert_eq!(out.radii[0], 0.0);
        assert_eq!(out.radii[1], 0.0);
    }
}
