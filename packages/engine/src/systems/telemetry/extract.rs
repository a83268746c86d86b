use std::collections::HashMap;

use serde::Serialize;

use crate::core::math::Point;
use crate::domain::stone::{Stone, StoneId};
use crate::systems::rigid_body::convert::{from_point2, from_vector};
use crate::systems::rigid_body::PhysicsWorld;

/// One active contact as seen from one of the two bodies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ContactEvent {
    /// Contact normal pointing away from this body.
    pub normal: Point,
    /// First contact point, world space.
    pub point: Point,
    /// Penetration depth, used as an impulse proxy.
    pub impulse: f32,
    /// Normal impulse reported by the solver for the same contact.
    pub normal_impulse: f32,
    /// The other stone, `None` for ground.
    pub other: Option<StoneId>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoneTelemetry {
    pub stone_id: StoneId,
    pub angular_velocity: f32,
    pub linear_velocity: Point,
    pub contacts: Vec<ContactEvent>,
}

/// Build this step's telemetry into `out` (cleared first).
pub fn extract(physics: &PhysicsWorld, stones: &[Stone], out: &mut Vec<StoneTelemetry>) {
    out.clear();

    let mut contacts: HashMap<StoneId, Vec<ContactEvent>> = HashMap::new();

    for pair in physics.narrow_phase().contact_pairs() {
        if !pair.has_any_active_contact {
            continue;
        }
        let Some((manifold, contact)) = pair
            .manifolds
            .iter()
            .find_map(|m| m.points.first().map(|c| (m, c)))
        else {
            continue;
        };

        let stone_a = physics.collider_stone(pair.collider1);
        let stone_b = physics.collider_stone(pair.collider2);
        if stone_a.is_none() && stone_b.is_none() {
            continue;
        }

        let point = physics
            .colliders()
            .get(pair.collider1)
            .map(|c| from_point2(&(c.position() * contact.local_p1)))
            .unwrap_or(Point::ZERO);
        let normal = from_vector(&manifold.data.normal);
        let depth = (-contact.dist).max(0.0);
        let normal_impulse = contact.data.impulse;

        if let Some(a) = stone_a {
            contacts.entry(a).or_default().push(ContactEvent {
                normal,
                point,
                impulse: depth,
                normal_impulse,
                other: stone_b,
            });
        }
        if let Some(b) = stone_b {
            contacts.entry(b).or_default().push(ContactEvent {
                normal: -normal,
                point,
                impulse: depth,
                normal_impulse,
                other: stone_a,
            });
        }
    }

    for stone in stones {
        let Some(rb) = physics.body(stone.body) else {
            continue;
        };
        let linear_velocity = from_vector(rb.linvel());
        let angular_velocity = rb.angvel();
        let stone_contacts = contacts.remove(&stone.id).unwrap_or_default();
        let moving = !linear_velocity.is_zero() || angular_velocity != 0.0;
        if stone_contacts.is_empty() && !moving {
            continue;
        }
        out.push(StoneTelemetry {
            stone_id: stone.id,
            angular_velocity,
            linear_velocity,
            contacts: stone_contacts,
        });
    }
}
