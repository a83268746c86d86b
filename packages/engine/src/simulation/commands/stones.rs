use std::f32::consts::PI;

use rapier2d::na::{Point2, UnitComplex, Vector2};
use rapier2d::prelude::RigidBodyType;

use crate::core::math::{wrap_positive, Point};
use crate::domain::stone::{Stone, StoneId, StoneParams};
use crate::geometry::AnchoredTrapezoid;
use crate::systems::rigid_body::StoneBodyDesc;

use super::StackCore;

/// Everything needed to add one stone.
#[derive(Clone, Debug)]
pub struct StoneSpawn {
    pub vertices: Vec<Point>,
    pub params: StoneParams,
    /// World position of the polygon centroid (the body origin).
    pub position: Point,
    pub color: u32,
    /// World angle of the top face; defaults to the anchored face angle.
    pub top_angle: Option<f32>,
    pub anchor: Option<AnchoredTrapezoid>,
    /// Defaults to `position.x`.
    pub support_target_x: Option<f32>,
}

impl StoneSpawn {
    pub fn new(vertices: Vec<Point>, params: StoneParams, position: Point) -> Self {
        Self {
            vertices,
            params,
            position,
            color: 0x8a_80_78_ff,
            top_angle: None,
            anchor: None,
            support_target_x: None,
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_top_angle(mut self, top_angle: f32) -> Self {
        self.top_angle = Some(top_angle);
        self
    }

    pub fn with_anchor(mut self, anchor: AnchoredTrapezoid) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_support_target_x(mut self, x: f32) -> Self {
        self.support_target_x = Some(x);
        self
    }
}

pub(super) fn spawn_stone(world: &mut StackCore, spawn: StoneSpawn) -> Option<StoneId> {
    let id = StoneId(world.next_id);

    let desc = match StoneBodyDesc::new(id, &spawn.vertices, &spawn.params, spawn.position) {
        Ok(desc) => desc.with_damping(world.config.base_linear_damping, world.config.base_angular_damping),
        Err(reason) => {
            console_warn!("add_stone rejected: {}", reason);
            return None;
        }
    };

    let (body, collider) = match world.physics.insert_stone(&desc) {
        Ok(handles) => handles,
        Err(reason) => {
            console_warn!("add_stone rejected: {}", reason);
            return None;
        }
    };
    world.next_id = world.next_id.saturating_add(1);

    let top_angle = spawn
        .top_angle
        .filter(|a| a.is_finite())
        .or_else(|| spawn.anchor.map(|a| a.transform.rotation + a.metrics.top_angle_local));
    let target_body_angle = match (spawn.anchor, top_angle) {
        (Some(anchor), Some(top)) => {
            Some(top - anchor.transform.rotation - anchor.metrics.top_angle_local)
        }
        _ => None,
    };
    let support_target_x = spawn
        .support_target_x
        .filter(|x| x.is_finite())
        .unwrap_or(spawn.position.x);

    world.stones.push(Stone {
        id,
        body,
        collider,
        params: spawn.params,
        vertices: desc.vertices,
        mass: desc.mass,
        color: spawn.color,
        is_flipped: false,
        is_static: false,
        created_at: world.time,
        top_angle,
        anchor: spawn.anchor,
        support_target_x,
        target_body_angle,
    });

    Some(id)
}

pub(super) fn remove_stone(world: &mut StackCore, id: StoneId) {
    if let Some(idx) = world.stones.iter().position(|s| s.id == id) {
        let stone = world.stones.remove(idx);
        world.physics.remove_body(stone.body);
    }
}

pub(super) fn set_stone_static(world: &mut StackCore, id: StoneId, is_static: bool) {
    let Some(stone) = world.stones.iter_mut().find(|s| s.id == id) else {
        return;
    };
    let Some(rb) = world.physics.body_mut(stone.body) else {
        return;
    };
    if is_static {
        rb.set_linvel(Vector2::zeros(), false);
        rb.set_angvel(0.0, false);
        rb.set_body_type(RigidBodyType::Fixed, true);
    } else {
        rb.set_body_type(RigidBodyType::Dynamic, true);
    }
    stone.is_static = is_static;
}

pub(super) fn set_stone_angle(world: &mut StackCore, id: StoneId, angle: f32) {
    if !angle.is_finite() {
        return;
    }
    let Some(stone) = world.stones.iter_mut().find(|s| s.id == id) else {
        return;
    };
    let Some(rb) = world.physics.body_mut(stone.body) else {
        return;
    };
    rb.set_rotation(UnitComplex::new(angle), true);
    rb.set_angvel(0.0, true);

    stone.top_angle = Some(stone.face_angle_at(angle));
    if stone.anchor.is_some() {
        stone.target_body_angle = Some(angle);
    }
}

pub(super) fn apply_force(world: &mut StackCore, id: StoneId, force: Point, at: Option<Point>) {
    if !force.is_finite() {
        return;
    }
    let Some(stone) = world.stones.iter().find(|s| s.id == id) else {
        return;
    };
    let Some(rb) = world.physics.body_mut(stone.body) else {
        return;
    };
    let f = Vector2::new(force.x, force.y);
    match at {
        Some(p) if p.is_finite() => rb.add_force_at_point(f, Point2::new(p.x, p.y), true),
        _ => rb.add_force(f, true),
    }
}

pub(super) fn flip_stone(world: &mut StackCore, id: StoneId) {
    let Some(stone) = world.stones.iter_mut().find(|s| s.id == id) else {
        return;
    };
    let Some(rb) = world.physics.body_mut(stone.body) else {
        return;
    };
    let angle = rb.rotation().angle() + PI;
    rb.set_rotation(UnitComplex::new(angle), true);

    stone.is_flipped = !stone.is_flipped;
    stone.top_angle = stone.top_angle.map(|t| wrap_positive(t + PI));
    if let (Some(_), Some(top)) = (stone.anchor, stone.top_angle) {
        stone.target_body_angle = Some(stone.body_angle_for(top));
    }
}

pub(super) fn stabilize_bodies(world: &mut StackCore) {
    for stone in &world.stones {
        let Some(rb) = world.physics.body_mut(stone.body) else {
            continue;
        };
        rb.set_linvel(Vector2::zeros(), false);
        rb.set_angvel(0.0, false);
        rb.reset_forces(false);
        rb.reset_torques(false);
        if rb.is_dynamic() {
            rb.sleep();
        }
    }
}

pub(super) fn clear(world: &mut StackCore) {
    for stone in world.stones.drain(..) {
        world.physics.remove_body(stone.body);
    }
    world.telemetry.clear();
    world.time = 0.0;
    // `next_id` keeps counting: a stale id never names a new stone.
}
