//! Rounded, slant-edged quadrilateral ("trapezoid") synthesis.
//!
//! The raw shape is built in a frame where the previous stone's top edge is
//! horizontal: the bottom edge passes through the origin tilted by `beta`,
//! the top edge passes through `(0, height)` tilted by `tau`, and the side
//! edges interpolate half-width linearly in `y`. After filleting and
//! recentering, `world` is that frame rotated by the previous top angle.

use serde::{Deserialize, Serialize};

use crate::core::math::{Point, EPSILON};

use super::fillet::fillet_polygon;
use super::polygon::{recenter, rotate_all};

/// How much a full taper narrows the top edge.
pub const TAPER_FACTOR: f32 = 0.35;

/// Default arc points per fillet.
pub const DEFAULT_SEGMENTS: u32 = 6;

/// Orientation-independent shape request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidGeometry {
    pub width_bottom: f32,
    pub height: f32,
    /// 0 = rectangle, 1 = top is 65% of the bottom.
    pub taper: f32,
    /// 0 = sharp corners, 1 = maximal rounding.
    pub round: f32,
}

impl TrapezoidGeometry {
    pub fn new(width_bottom: f32, height: f32, taper: f32, round: f32) -> Self {
        Self { width_bottom, height, taper, round }
    }

    /// Half-widths at the bottom and top edges.
    pub fn half_widths(&self) -> (f32, f32) {
        let hb = finite_or(self.width_bottom, 0.0).abs() * 0.5;
        let taper = finite_or(self.taper, 0.0).clamp(0.0, 1.0);
        (hb, hb * (1.0 - TAPER_FACTOR * taper))
    }
}

/// Full build request. `beta`/`tau` are relative to `prev_top_angle_global`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidParams {
    pub geometry: TrapezoidGeometry,
    /// Bottom-edge tilt relative to the reference angle.
    pub beta: f32,
    /// Top-edge tilt relative to the reference angle.
    pub tau: f32,
    /// World angle of the previous stone's top edge.
    pub prev_top_angle_global: f32,
    #[serde(default = "default_segments")]
    pub segments: u32,
}

pub(crate) fn default_segments() -> u32 {
    DEFAULT_SEGMENTS
}

impl TrapezoidParams {
    pub fn new(geometry: TrapezoidGeometry, beta: f32, tau: f32, prev_top_angle_global: f32) -> Self {
        Self {
            geometry,
            beta,
            tau,
            prev_top_angle_global,
            segments: DEFAULT_SEGMENTS,
        }
    }

    /// Build from world-absolute edge angles.
    pub fn from_absolute(
        geometry: TrapezoidGeometry,
        beta_abs: f32,
        tau_abs: f32,
        prev_top_angle_global: f32,
        segments: u32,
    ) -> Self {
        Self {
            geometry,
            beta: beta_abs - prev_top_angle_global,
            tau: tau_abs - prev_top_angle_global,
            prev_top_angle_global,
            segments,
        }
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }
}

/// Chaining metrics of a built trapezoid. Local and world points are
/// relative to the polygon centroid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidMetrics {
    pub bottom_mid_local: Point,
    pub top_mid_local: Point,
    pub bottom_mid_world: Point,
    pub top_mid_world: Point,
    pub bottom_angle_local: f32,
    pub top_angle_local: f32,
    pub bottom_angle_world: f32,
    pub top_angle_world: f32,
    pub bottom_width: f32,
    pub top_width: f32,
    pub height_local: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrapezoidResult {
    pub local: Vec<Point>,
    pub world: Vec<Point>,
    /// Pre-fillet corners, counter-clockwise from bottom-left.
    pub corners_local: [Point; 4],
    pub corners_world: [Point; 4],
    /// Fillet radius actually applied at each corner.
    pub corner_radii: [f32; 4],
    pub metrics: TrapezoidMetrics,
}

/// Build the rounded quadrilateral described by `params`.
///
/// Never fails: degenerate input degrades to sharp or squashed corners.
pub fn build_trapezoid(params: &TrapezoidParams) -> TrapezoidResult {
    let geometry = &params.geometry;
    let reference = finite_or(params.prev_top_angle_global, 0.0);
    let height = finite_or(geometry.height, 0.0).abs().max(EPSILON);
    let (hb, ht) = geometry.half_widths();

    let corners = raw_corners(hb, ht, height, params.beta, params.tau);

    let bottom_width = corners[0].distance(corners[1]);
    let top_width = corners[3].distance(corners[2]);

    let round = finite_or(geometry.round, 0.0).clamp(0.0, 1.0);
    let requested = round * 0.5 * bottom_width.min(height);
    let filleted = fillet_polygon(&corners, requested, params.segments);

    let mut local = filleted.points;
    let offset = recenter(&mut local);

    let mut corners_local = corners;
    for c in corners_local.iter_mut() {
        *c = *c - offset;
    }
    let mut corner_radii = [0.0f32; 4];
    for (dst, src) in corner_radii.iter_mut().zip(filleted.radii.iter()) {
        *dst = *src;
    }

    let world = rotate_all(&local, reference);
    let corners_world = corners_local.map(|c| c.rotate(reference));

    let bottom_mid_local = corners_local[0].midpoint(corners_local[1]);
    let top_mid_local = corners_local[3].midpoint(corners_local[2]);
    let bottom_angle_local = (corners_local[1] - corners_local[0]).angle();
    let top_angle_local = (corners_local[2] - corners_local[3]).angle();

    let metrics = TrapezoidMetrics {
        bottom_mid_local,
        top_mid_local,
        bottom_mid_world: bottom_mid_local.rotate(reference),
        top_mid_world: top_mid_local.rotate(reference),
        bottom_angle_local,
        top_angle_local,
        bottom_angle_world: bottom_angle_local + reference,
        top_angle_world: top_angle_local + reference,
        bottom_width,
        top_width,
        height_local: top_mid_local.y - bottom_mid_local.y,
    };

    TrapezoidResult {
        local,
        world,
        corners_local,
        corners_world,
        corner_radii,
        metrics,
    }
}

/// Corners as intersections of the slanted edges with the side lines.
///
/// Side lines: `x = ±(hb + k·y)` with `k = (ht − hb) / height`.
/// Bottom edge: `y = tan(beta)·x`. Top edge: `y = height + tan(tau)·x`.
fn raw_corners(hb: f32, ht: f32, height: f32, beta: f32, tau: f32) -> [Point; 4] {
    let k = (ht - hb) / height;
    let tb = finite_or(finite_or(beta, 0.0).tan(), 0.0);
    let tt = finite_or(finite_or(tau, 0.0).tan(), 0.0);

    let bl_x = guarded_div(-hb, 1.0 + k * tb);
    let br_x = guarded_div(hb, 1.0 - k * tb);
    let tr_x = guarded_div(ht, 1.0 - k * tt);
    let tl_x = guarded_div(-ht, 1.0 + k * tt);

    [
        Point::new(bl_x, tb * bl_x),
        Point::new(br_x, tb * br_x),
        Point::new(tr_x, height + tt * tr_x),
        Point::new(tl_x, height + tt * tl_x),
    ]
}

/// Division with the denominator pushed away from zero.
#[inline]
fn guarded_div(num: f32, den: f32) -> f32 {
    if den.abs() < EPSILON {
        num / EPSILON.copysign(den)
    } else {
        num / den
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::fillet::corner_radius_limit;
    use crate::geometry::polygon::centroid;

    fn params(beta: f32, tau: f32, taper: f32, round: f32, reference: f32) -> TrapezoidParams {
        TrapezoidParams::new(TrapezoidGeometry::new(100.0, 50.0, taper, round), beta, tau, reference)
    }

    #[test]
    fn flat_unrounded_is_centered_rectangle() {
        let r = build_trapezoid(&params(0.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(
            r.local,
            vec![
                Point::new(-50.0, -25.0),
                Point::new(50.0, -25.0),
                Point::new(50.0, 25.0),
                Point::new(-50.0, 25.0),
            ]
        );
        assert!((r.metrics.bottom_width - 100.0).abs() < 1e-4);
        assert!((r.metrics.top_width - 100.0).abs() < 1e-4);
        assert!((r.metrics.height_local - 50.0).abs() < 1e-4);
    }

    #[test]
    fn centroid_is_origin_across_inputs() {
        let cases = [
            (0.1, -0.2, 0.5, 0.3, 0.4),
            (-0.3, 0.25, 1.0, 1.0, -1.2),
            (0.0, 0.4, 0.2, 0.8, 3.0),
            (0.5, 0.5, 0.0, 0.1, 0.0),
        ];
        for (beta, tau, taper, round, reference) in cases {
            let r = build_trapezoid(&params(beta, tau, taper, round, reference));
            let c = centroid(&r.local);
            assert!(c.length() < 1e-3, "centroid {:?} for {:?}", c, (beta, tau));
        }
    }

    #[test]
    fn world_is_rotation_of_local() {
        let r = build_trapezoid(&params(0.2, -0.1, 0.4, 0.6, 0.9));
        assert_eq!(r.local.len(), r.world.len());
        for (l, w) in r.local.iter().zip(r.world.iter()) {
            assert!((l.length() - w.length()).abs() < 1e-3);
        }
        assert!((r.metrics.top_angle_world - (r.metrics.top_angle_local + 0.9)).abs() < 1e-5);
    }

    #[test]
    fn edge_angles_follow_tilts_without_taper() {
        let r = build_trapezoid(&params(0.15, -0.2, 0.0, 0.0, 0.0));
        assert!((r.metrics.bottom_angle_local - 0.15).abs() < 1e-5);
        assert!((r.metrics.top_angle_local + 0.2).abs() < 1e-5);
    }

    #[test]
    fn taper_narrows_top_edge() {
        let r = build_trapezoid(&params(0.0, 0.0, 1.0, 0.0, 0.0));
        assert!((r.metrics.top_width - 65.0).abs() < 1e-3);
        assert!((r.metrics.bottom_width - 100.0).abs() < 1e-3);
    }

    #[test]
    fn fillet_radius_respects_corner_limit() {
        let r = build_trapezoid(&params(0.3, -0.25, 0.8, 1.0, 0.0));
        let c = r.corners_local;
        for i in 0..4 {
            let prev = c[(i + 3) % 4];
            let next = c[(i + 1) % 4];
            let limit = corner_radius_limit(prev, c[i], next);
            assert!(r.corner_radii[i] <= limit + 1e-4);
            let (theta, l1, l2) = crate::geometry::fillet::corner_angle(prev, c[i], next);
            assert!(r.corner_radii[i] <= l1.min(l2) * (theta * 0.5).tan() + 1e-4);
        }
    }

    #[test]
    fn rounded_point_count_matches_segments() {
        let r = build_trapezoid(&params(0.0, 0.0, 0.0, 0.5, 0.0).with_segments(3));
        assert_eq!(r.local.len(), 4 * 4);
    }

    #[test]
    fn near_vertical_tilts_stay_finite() {
        let near = std::f32::consts::FRAC_PI_2 - 1e-7;
        let r = build_trapezoid(&params(near, -near, 1.0, 1.0, 0.0));
        assert!(r.local.iter().all(|p| p.is_finite()));
        assert!(r.world.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn absolute_variant_subtracts_reference() {
        let g = TrapezoidGeometry::new(80.0, 40.0, 0.0, 0.0);
        let p = TrapezoidParams::from_absolute(g, 0.5, 0.7, 0.4, 4);
        assert!((p.beta - 0.1).abs() < 1e-6);
        assert!((p.tau - 0.3).abs() < 1e-6);
        let r = build_trapezoid(&p);
        assert!((r.metrics.bottom_angle_world - 0.5).abs() < 1e-5);
        assert!((r.metrics.top_angle_world - 0.7).abs() < 1e-5);
    }
}
