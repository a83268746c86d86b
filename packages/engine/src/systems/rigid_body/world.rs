use rapier2d::prelude::{
    CCDSolver, ColliderBuilder, ColliderHandle, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    QueryPipeline, RigidBody, RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
};

use crate::core::error::StoneRejection;
use crate::core::math::Point;
use crate::domain::config::GroundConfig;
use crate::domain::stone::StoneId;

use super::body::StoneBodyDesc;
use super::convert::to_vector;

/// `user_data` of bodies that are not stones (ground).
const NO_STONE: u128 = 0;

/// Owns every rapier set and the pipeline that steps them.
pub struct PhysicsWorld {
    gravity: rapier2d::na::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    ground: Option<RigidBodyHandle>,
}

impl PhysicsWorld {
    pub fn new(gravity: Point) -> Self {
        Self {
            gravity: to_vector(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            ground: None,
        }
    }

    pub fn set_gravity(&mut self, gravity: Point) {
        self.gravity = to_vector(gravity);
    }

    pub fn gravity(&self) -> Point {
        Point::new(self.gravity.x, self.gravity.y)
    }

    /// Static slab whose top surface sits at `ground.top_y`.
    pub fn insert_ground(&mut self, ground: &GroundConfig) {
        if let Some(old) = self.ground.take() {
            self.remove_body(old);
        }
        if !ground.enabled {
            return;
        }
        let half_thickness = ground.thickness * 0.5;
        let rb = RigidBodyBuilder::fixed()
            .translation(rapier2d::na::Vector2::new(ground.center_x, ground.top_y - half_thickness))
            .user_data(NO_STONE)
            .build();
        let handle = self.bodies.insert(rb);
        let collider = ColliderBuilder::cuboid(ground.half_width, half_thickness)
            .friction(ground.friction)
            .restitution(ground.restitution)
            .build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        self.ground = Some(handle);
    }

    /// Create the body + collider for a stone.
    pub fn insert_stone(
        &mut self,
        desc: &StoneBodyDesc,
    ) -> Result<(RigidBodyHandle, ColliderHandle), StoneRejection> {
        let collider = desc.collider()?.build();
        let body_handle = self.bodies.insert(desc.rigid_body().build());
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);
        if let Some(rb) = self.bodies.get_mut(body_handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }
        Ok((body_handle, collider_handle))
    }

    /// Remove a body and its colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the integrator by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Forces added with `add_force` persist in rapier until reset; the
    /// engine treats them as single-step.
    pub fn clear_forces(&mut self) {
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
            rb.reset_torques(false);
        }
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn narrow_phase(&self) -> &NarrowPhase {
        &self.narrow_phase
    }

    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    /// Stone owning `collider`, `None` for ground or unknown colliders.
    pub fn collider_stone(&self, collider: ColliderHandle) -> Option<StoneId> {
        let parent = self.colliders.get(collider)?.parent()?;
        let data = self.bodies.get(parent)?.user_data;
        if data == NO_STONE {
            None
        } else {
            Some(StoneId(data as u32))
        }
    }

    /// Number of rigid bodies, ground included.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn has_ground(&self) -> bool {
        self.ground.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stone::StoneParams;

    fn square(half: f32) -> Vec<Point> {
        vec![
            Point::new(-half, -half),
            Point::new(half, -half),
            Point::new(half, half),
            Point::new(-half, half),
        ]
    }

    #[test]
    fn stone_falls_onto_ground_and_stops() {
        let mut world = PhysicsWorld::new(Point::new(0.0, -500.0));
        world.insert_ground(&GroundConfig::default());
        let desc = StoneBodyDesc::new(StoneId(1), &square(10.0), &StoneParams::default(), Point::new(0.0, 40.0))
            .unwrap();
        let (handle, _) = world.insert_stone(&desc).unwrap();

        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }
        let y = world.body(handle).unwrap().translation().y;
        assert!(y > 5.0 && y < 15.0, "stone should rest on ground, y={}", y);
    }

    #[test]
    fn collider_maps_back_to_stone() {
        let mut world = PhysicsWorld::new(Point::ZERO);
        let desc = StoneBodyDesc::new(StoneId(7), &square(5.0), &StoneParams::default(), Point::ZERO)
            .unwrap();
        let (_, collider) = world.insert_stone(&desc).unwrap();
        assert_eq!(world.collider_stone(collider), Some(StoneId(7)));
    }

    #[test]
    fn integrator_mass_matches_polygon_mass() {
        let mut world = PhysicsWorld::new(Point::ZERO);
        let desc = StoneBodyDesc::new(StoneId(1), &square(5.0), &StoneParams::default(), Point::ZERO)
            .unwrap();
        let (handle, _) = world.insert_stone(&desc).unwrap();
        let mass = world.body(handle).unwrap().mass();
        assert!((mass - desc.mass).abs() < 1e-2, "mass {} vs {}", mass, desc.mass);
    }

    #[test]
    fn remove_body_drops_it() {
        let mut world = PhysicsWorld::new(Point::ZERO);
        let desc = StoneBodyDesc::new(StoneId(1), &square(5.0), &StoneParams::default(), Point::ZERO)
            .unwrap();
        let (handle, _) = world.insert_stone(&desc).unwrap();
        assert_eq!(world.body_count(), 1);
        world.remove_body(handle);
        assert_eq!(world.body_count(), 0);
    }
}
