use crate::core::math::{Point, EPSILON};

/// Signed shoelace area (positive for counter-clockwise winding).
pub fn signed_area(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0f32;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        acc += a.cross(b);
    }
    acc * 0.5
}

pub fn area(points: &[Point]) -> f32 {
    signed_area(points).abs()
}

/// Area-weighted centroid. Falls back to the vertex average for
/// polygons with (near) zero area.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let a = signed_area(points);
    if a.abs() < EPSILON {
        let mut sum = Point::ZERO;
        for p in points {
            sum += *p;
        }
        return sum * (1.0 / points.len() as f32);
    }

    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        let c = p.cross(q);
        cx += (p.x + q.x) * c;
        cy += (p.y + q.y) * c;
    }
    let d = 6.0 * a;
    Point::new(cx / d, cy / d)
}

/// Shift every point so the centroid lands on the origin.
/// Returns the offset that was subtracted.
pub fn recenter(points: &mut [Point]) -> Point {
    let c = centroid(points);
    for p in points.iter_mut() {
        *p = *p - c;
    }
    c
}

pub fn rotate_all(points: &[Point], angle: f32) -> Vec<Point> {
    points.iter().map(|p| p.rotate(angle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_area_and_centroid() {
        let tri = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
        assert!((area(&tri) - 50.0).abs() < 1e-4);
        let c = centroid(&tri);
        assert!((c.x - 10.0 / 3.0).abs() < 1e-4);
        assert!((c.y - 10.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn clockwise_winding_has_negative_signed_area() {
        let cw = [Point::new(0.0, 0.0), Point::new(0.0, 10.0), Point::new(10.0, 0.0)];
        assert!(signed_area(&cw) < 0.0);
        assert!((area(&cw) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_centroid_is_vertex_average() {
        let line = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(4.0, 0.0)];
        assert_eq!(centroid(&line), Point::new(2.0, 0.0));
    }
}
