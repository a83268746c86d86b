//! Point <-> nalgebra conversions at the integrator boundary.

use rapier2d::na::{Point2, Vector2};

use crate::core::math::Point;

#[inline]
pub fn to_vector(p: Point) -> Vector2<f32> {
    Vector2::new(p.x, p.y)
}

#[inline]
pub fn to_point2(p: Point) -> Point2<f32> {
    Point2::new(p.x, p.y)
}

#[inline]
pub fn from_vector(v: &Vector2<f32>) -> Point {
    Point::new(v.x, v.y)
}

#[inline]
pub fn from_point2(p: &Point2<f32>) -> Point {
    Point::new(p.x, p.y)
}
