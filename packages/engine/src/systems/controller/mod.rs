//! Continuous Force Controller
//!
//! Runs once per step before integration and biases the top of the stack
//! toward holding (stabilizer) or toppling (disturber). Only the top
//! `influenced_count` stones are touched; the primary stone gets the full
//! correction, the others a reduced tier, and the settled mass below gets
//! nothing.
//!
//! Order per step:
//! 1. rank stones, restore base friction/damping
//! 2. stabilizer pass
//! 3. disturber pass
//! 4. friction overrides
//! 5. gravity bias

mod bias;
mod disturber;
mod inputs;
mod ranking;
mod stabilizer;

pub use inputs::{ControlInputs, EnergyPhase, UpdateOptions};
pub use ranking::{rank_top_stones, RankedStone};

use rand::rngs::SmallRng;
use rapier2d::prelude::RigidBodyHandle;

use crate::core::math::Point;
use crate::domain::config::{ControllerTuning, StackConfig};
use crate::domain::stone::Stone;
use crate::systems::rigid_body::convert::from_vector;
use crate::systems::rigid_body::PhysicsWorld;

/// Everything one controller pass may read or write.
pub struct ControllerContext<'a> {
    pub physics: &'a mut PhysicsWorld,
    pub stones: &'a [Stone],
    pub config: &'a StackConfig,
    pub rng: &'a mut SmallRng,
    pub dt: f32,
}

impl ControllerContext<'_> {
    fn tuning(&self) -> &ControllerTuning {
        &self.config.controller
    }
}

/// Kinematic state of one body, read once per pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BodyState {
    pub position: Point,
    pub angle: f32,
    pub linvel: Point,
    pub angvel: f32,
    pub mass: f32,
}

impl BodyState {
    pub(crate) fn read(physics: &PhysicsWorld, handle: RigidBodyHandle) -> Option<Self> {
        let rb = physics.body(handle)?;
        Some(Self {
            position: from_vector(rb.translation()),
            angle: rb.rotation().angle(),
            linvel: from_vector(rb.linvel()),
            angvel: rb.angvel(),
            mass: rb.mass(),
        })
    }

    /// World position of a body-space point.
    pub(crate) fn to_world(&self, body_point: Point) -> Point {
        self.position + body_point.rotate(self.angle)
    }
}

/// Run one controller pass. Returns how many stones were influenced.
pub fn apply(ctx: &mut ControllerContext<'_>, inputs: &ControlInputs) -> usize {
    let inputs = inputs.sanitized();
    restore_materials(ctx.physics, ctx.stones, ctx.config);

    let ranked = rank_top_stones(ctx.physics, ctx.stones, ctx.tuning());
    if ranked.is_empty() {
        return 0;
    }

    let mut friction_scale = vec![1.0f32; ranked.len()];

    if inputs.stabilizer > 0.0 {
        stabilizer::apply(ctx, &ranked, &inputs, &mut friction_scale);
    }
    if inputs.disturber > 0.0 {
        disturber::apply(ctx, &ranked, &inputs, &mut friction_scale);
    }

    let max_friction = ctx.tuning().max_friction;
    for (r, scale) in ranked.iter().zip(friction_scale.iter()) {
        let stone = &ctx.stones[r.index];
        if let Some(collider) = ctx.physics.colliders.get_mut(stone.collider) {
            let friction = (stone.params.friction_clamped() * scale).clamp(0.0, max_friction);
            collider.set_friction(friction);
        }
    }

    if !inputs.gravity_bias.is_zero() {
        bias::apply(ctx, &ranked, inputs.gravity_bias);
    }

    ranked.len()
}

/// Reset every stone to its base damping and friction so overrides never
/// outlive the pass that set them.
pub fn restore_materials(physics: &mut PhysicsWorld, stones: &[Stone], config: &StackConfig) {
    let lin = config.base_linear_damping;
    let ang = config.base_angular_damping;
    for stone in stones {
        if let Some(rb) = physics.body_mut(stone.body) {
            rb.set_linear_damping(lin);
            rb.set_angular_damping(ang);
        }
        if let Some(collider) = physics.colliders.get_mut(stone.collider) {
            collider.set_friction(stone.params.friction_clamped());
        }
    }
}
