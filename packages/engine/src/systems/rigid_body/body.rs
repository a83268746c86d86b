use rapier2d::prelude::{ColliderBuilder, RigidBodyBuilder};

use crate::core::error::StoneRejection;
use crate::core::math::Point;
use crate::domain::stone::{StoneId, StoneParams};
use crate::geometry::polygon::{area, recenter};

use super::convert::to_point2;

/// Validated description of a stone body, ready to hand to the integrator.
pub struct StoneBodyDesc {
    pub id: StoneId,
    pub position: Point,
    pub vertices: Vec<Point>,
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Polygon area × density.
    pub mass: f32,
}

impl StoneBodyDesc {
    /// Check the inputs and compute the stone's mass. Vertices are shifted
    /// so their centroid is the body origin, which sits at `position`.
    pub fn new(
        id: StoneId,
        vertices: &[Point],
        params: &StoneParams,
        position: Point,
    ) -> Result<Self, StoneRejection> {
        if vertices.len() < 3 {
            return Err(StoneRejection::TooFewVertices(vertices.len()));
        }
        if !position.is_finite() || vertices.iter().any(|v| !v.is_finite()) {
            return Err(StoneRejection::NonFinite);
        }
        if !params.density.is_finite() || params.density <= 0.0 {
            return Err(StoneRejection::NonFinite);
        }

        let polygon_area = area(vertices);
        if !(polygon_area > 0.0) {
            return Err(StoneRejection::ZeroArea);
        }

        let mut vertices = vertices.to_vec();
        recenter(&mut vertices);

        Ok(Self {
            id,
            position,
            vertices,
            friction: params.friction_clamped(),
            restitution: params.restitution_clamped(),
            density: params.density,
            linear_damping: 0.0,
            angular_damping: 0.0,
            mass: polygon_area * params.density,
        })
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.max(0.0);
        self.angular_damping = angular.max(0.0);
        self
    }

    pub(crate) fn rigid_body(&self) -> RigidBodyBuilder {
        RigidBodyBuilder::dynamic()
            .translation(rapier2d::na::Vector2::new(self.position.x, self.position.y))
            .rotation(0.0)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .user_data(self.id.0 as u128)
    }

    /// Convex hull collider. The stone outlines this engine builds are
    /// convex, so the hull is the polygon itself.
    pub(crate) fn collider(&self) -> Result<ColliderBuilder, StoneRejection> {
        let points: Vec<_> = self.vertices.iter().map(|v| to_point2(*v)).collect();
        let builder = ColliderBuilder::convex_hull(&points).ok_or(StoneRejection::ColliderFailed)?;
        Ok(builder
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density))
    }
}
