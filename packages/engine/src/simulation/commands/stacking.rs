use serde::{Deserialize, Serialize};

use crate::core::math::Point;
use crate::domain::stone::{StoneId, StoneParams};
use crate::geometry::trapezoid::{default_segments, DEFAULT_SEGMENTS};
use crate::geometry::{
    anchor_next, build_trapezoid, ground_anchor, AnchoredTrapezoid, TrapezoidGeometry,
    TrapezoidParams, Transform,
};
use crate::systems::rigid_body::convert::from_vector;

use super::stones::{spawn_stone, StoneSpawn};
use super::StackCore;

/// Geometry -> anchoring -> add_stone in one call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackRequest {
    pub geometry: TrapezoidGeometry,
    /// Bottom tilt relative to the previous top face.
    #[serde(default)]
    pub beta: f32,
    /// Top tilt relative to the previous top face.
    #[serde(default)]
    pub tau: f32,
    #[serde(default = "default_segments")]
    pub segments: u32,
    #[serde(default)]
    pub params: StoneParams,
    #[serde(default = "default_color")]
    pub color: u32,
    /// Added to the anchor translation (e.g. a small lift to avoid overlap).
    #[serde(default)]
    pub stack_offset: Point,
    /// Defaults to the anchor translation's X.
    #[serde(default)]
    pub support_target_x: Option<f32>,
}

const DEFAULT_COLOR: u32 = 0x8a_80_78_ff;

fn default_color() -> u32 {
    DEFAULT_COLOR
}

impl StackRequest {
    pub fn new(geometry: TrapezoidGeometry, params: StoneParams) -> Self {
        Self {
            geometry,
            beta: 0.0,
            tau: 0.0,
            segments: DEFAULT_SEGMENTS,
            params,
            color: DEFAULT_COLOR,
            stack_offset: Point::ZERO,
            support_target_x: None,
        }
    }

    pub fn with_tilts(mut self, beta: f32, tau: f32) -> Self {
        self.beta = beta;
        self.tau = tau;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_stack_offset(mut self, offset: Point) -> Self {
        self.stack_offset = offset;
        self
    }
}

/// Where the next stone goes: on the topmost stone, otherwise on the ground.
///
/// An anchored top stone chains through its trapezoid metrics. A stone
/// added without an anchor is stacked on its highest point, with its body
/// rotation as the face angle.
pub(super) fn next_anchor(world: &StackCore, stack_offset: Point) -> Transform {
    let prev = world.top_stone().and_then(|stone| {
        let rb = world.physics.body(stone.body)?;
        Some((stone, Transform::new(from_vector(rb.translation()), rb.rotation().angle())))
    });

    match prev {
        Some((stone, body)) => match stone.anchor {
            Some(anchor) => anchor_next(&anchor.metrics, body, stack_offset),
            None => Transform {
                translation: body.translation
                    + Point::new(0.0, stone.max_local_y()).rotate(body.rotation)
                    + stack_offset,
                rotation: stone.face_angle_at(body.rotation),
            },
        },
        None => {
            let ground = &world.config.ground;
            let top = if ground.enabled { ground.top_y } else { 0.0 };
            let mut t = ground_anchor(top, ground.center_x);
            t.translation += stack_offset;
            t
        }
    }
}

pub(super) fn stack_stone(world: &mut StackCore, request: &StackRequest) -> Option<StoneId> {
    let transform = next_anchor(world, request.stack_offset);

    let params = TrapezoidParams::new(request.geometry, request.beta, request.tau, transform.rotation)
        .with_segments(request.segments);
    let shape = build_trapezoid(&params);
    let anchored = AnchoredTrapezoid::new(transform, shape.metrics);

    let spawn = StoneSpawn::new(shape.world, request.params, anchored.body_origin())
        .with_color(request.color)
        .with_anchor(anchored)
        .with_top_angle(shape.metrics.top_angle_world)
        .with_support_target_x(request.support_target_x.unwrap_or(transform.translation.x));

    spawn_stone(world, spawn)
}
