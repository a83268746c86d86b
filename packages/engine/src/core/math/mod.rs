//! Math primitives shared by geometry, controller and telemetry.

mod angle;
mod point;

pub use angle::{angle_delta, wrap_angle, wrap_positive};
pub use point::Point;

/// Guard used for near-zero denominators and degenerate lengths.
pub const EPSILON: f32 = 1e-6;
