use std::f32::consts::{PI, TAU};

/// Wrap an angle into (-π, π].
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}

/// Shortest signed rotation taking `from` onto `to`, in (-π, π].
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn wrap_positive(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    angle.rem_euclid(TAU)
}
