use std::fmt;

use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use serde::{Deserialize, Serialize};

use crate::core::math::Point;
use crate::geometry::AnchoredTrapezoid;

/// Stable identifier handed out by the world manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoneId(pub u32);

impl fmt::Display for StoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Material and shape-generation inputs for one stone.
///
/// Produced by an external mapper and treated as read-only here.
/// `convexity`, `jaggedness`, `radius`, `aspect` and `seed` are opaque to the
/// engine; they are carried so renderers can reproduce the same stone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoneParams {
    pub convexity: f32,
    pub jaggedness: f32,
    pub density: f32,
    /// Surface friction, (0, 1].
    pub friction: f32,
    /// Bounciness, [0, 1].
    pub restitution: f32,
    pub base_bias: f32,
    pub radius: f32,
    pub aspect: f32,
    pub seed: u32,
}

impl Default for StoneParams {
    fn default() -> Self {
        Self {
            convexity: 1.0,
            jaggedness: 0.0,
            density: 1.0,
            friction: 0.6,
            restitution: 0.05,
            base_bias: 0.0,
            radius: 40.0,
            aspect: 1.0,
            seed: 0,
        }
    }
}

impl StoneParams {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Friction clamped into (0, 1].
    pub fn friction_clamped(&self) -> f32 {
        if self.friction.is_finite() {
            self.friction.clamp(0.001, 1.0)
        } else {
            0.5
        }
    }

    /// Restitution clamped into [0, 1].
    pub fn restitution_clamped(&self) -> f32 {
        if self.restitution.is_finite() {
            self.restitution.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Runtime record of one simulated stone.
///
/// Geometry never changes after creation. The controller only touches the
/// body's velocity, angle and per-step friction; the mutators on
/// `StackCore` touch angle, static flag and the cached angles below.
#[derive(Clone, Debug)]
pub struct Stone {
    pub id: StoneId,
    pub(crate) body: RigidBodyHandle,
    pub(crate) collider: ColliderHandle,
    pub params: StoneParams,
    /// Body-local vertices (centroid at origin).
    pub vertices: Vec<Point>,
    /// Polygon area × density.
    pub mass: f32,
    pub color: u32,
    pub is_flipped: bool,
    pub is_static: bool,
    /// Simulation time (seconds) when the stone was added.
    pub created_at: f64,
    /// Cached world angle of the stone's top face.
    pub top_angle: Option<f32>,
    pub anchor: Option<AnchoredTrapezoid>,
    /// World X the stabilizer pulls the anchored bottom center toward.
    pub support_target_x: f32,
    /// Body rotation that keeps the anchored top face at `top_angle`.
    pub target_body_angle: Option<f32>,
}

impl Stone {
    /// Top-face world angle for a given body rotation.
    pub fn face_angle_at(&self, body_angle: f32) -> f32 {
        match &self.anchor {
            Some(anchor) => body_angle + anchor.transform.rotation + anchor.metrics.top_angle_local,
            None => body_angle,
        }
    }

    /// Body rotation that would put the top face at `top_angle`.
    pub fn body_angle_for(&self, top_angle: f32) -> f32 {
        match &self.anchor {
            Some(anchor) => top_angle - anchor.transform.rotation - anchor.metrics.top_angle_local,
            None => top_angle,
        }
    }

    /// Bottom mid-edge in body space (origin when not anchored).
    pub fn bottom_mid_body(&self) -> Point {
        self.anchor
            .map(|a| a.metrics.bottom_mid_world)
            .unwrap_or(Point::ZERO)
    }

    /// Top mid-edge in body space, falling back to the highest vertex.
    pub fn top_mid_body(&self) -> Point {
        match &self.anchor {
            Some(anchor) => anchor.metrics.top_mid_world,
            None => {
                let top = self
                    .vertices
                    .iter()
                    .map(|v| v.y)
                    .fold(0.0f32, f32::max);
                Point::new(0.0, top)
            }
        }
    }

    /// Highest vertex Y in body space, ignoring rotation.
    pub fn max_local_y(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.y)
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

/// Copy-on-read view of a stone for renderers and game logic.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoneSnapshot {
    pub id: StoneId,
    pub position: Point,
    pub angle: f32,
    pub vertices: Vec<Point>,
    pub color: u32,
    pub is_flipped: bool,
    pub is_static: bool,
    pub created_at: f64,
    pub top_angle: Option<f32>,
    pub mass: f32,
}
