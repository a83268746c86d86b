use crate::core::math::{wrap_angle, Point};
use crate::domain::stone::{Stone, StoneId, StoneSnapshot};
use crate::systems::rigid_body::convert::from_vector;

use super::StackCore;

/// Current (position, angle) of a stone's body.
fn pose(world: &StackCore, stone: &Stone) -> Option<(Point, f32)> {
    let rb = world.physics.body(stone.body)?;
    Some((from_vector(rb.translation()), rb.rotation().angle()))
}

pub(super) fn top_stone(world: &StackCore) -> Option<&Stone> {
    world
        .stones
        .iter()
        .filter_map(|s| pose(world, s).map(|(p, _)| (s, p.y + s.max_local_y())))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(s, _)| s)
}

fn snapshot_of(world: &StackCore, stone: &Stone) -> Option<StoneSnapshot> {
    let (position, angle) = pose(world, stone)?;
    Some(StoneSnapshot {
        id: stone.id,
        position,
        angle,
        vertices: stone.vertices.clone(),
        color: stone.color,
        is_flipped: stone.is_flipped,
        is_static: stone.is_static,
        created_at: stone.created_at,
        top_angle: stone.top_angle,
        mass: stone.mass,
    })
}

/// Snapshots in insertion order.
pub(super) fn snapshots(world: &StackCore) -> Vec<StoneSnapshot> {
    world
        .stones
        .iter()
        .filter_map(|s| snapshot_of(world, s))
        .collect()
}

pub(super) fn snapshot(world: &StackCore, id: StoneId) -> Option<StoneSnapshot> {
    let stone = world.stones.iter().find(|s| s.id == id)?;
    snapshot_of(world, stone)
}

/// Body angle wrapped into (-PI, PI] and compared against `threshold`.
/// An upside-down stone (angle PI) is not upright.
fn is_upright(angle: f32, threshold: f32) -> bool {
    wrap_angle(angle).abs() < threshold
}

pub(super) fn is_stone_stable(world: &StackCore, id: StoneId, threshold: f32) -> bool {
    let Some(stone) = world.stones.iter().find(|s| s.id == id) else {
        return false;
    };
    match pose(world, stone) {
        Some((_, angle)) => is_upright(angle, threshold),
        None => false,
    }
}

/// Ids of every stone that fails `is_stone_stable`, in insertion order.
pub(super) fn detect_tumble(world: &StackCore, threshold: f32) -> Vec<StoneId> {
    world
        .stones
        .iter()
        .filter(|s| match pose(world, s) {
            Some((_, angle)) => !is_upright(angle, threshold),
            None => true,
        })
        .map(|s| s.id)
        .collect()
}

/// Highest `position.y + max local vertex y` over all stones, 0 when empty.
/// Rotation is ignored.
pub(super) fn tower_height(world: &StackCore) -> f32 {
    world
        .stones
        .iter()
        .filter_map(|s| pose(world, s).map(|(p, _)| p.y + s.max_local_y()))
        .fold(None, |acc: Option<f32>, h| Some(acc.map_or(h, |m| m.max(h))))
        .unwrap_or(0.0)
}

/// Like `tower_height`, but with every vertex rotated into world space.
pub(super) fn tower_height_rotated(world: &StackCore) -> f32 {
    world
        .stones
        .iter()
        .filter_map(|s| {
            let (p, angle) = pose(world, s)?;
            s.vertices
                .iter()
                .map(|v| p.y + v.rotate(angle).y)
                .fold(None, |acc: Option<f32>, h| Some(acc.map_or(h, |m| m.max(h))))
        })
        .fold(None, |acc: Option<f32>, h| Some(acc.map_or(h, |m| m.max(h))))
        .unwrap_or(0.0)
}
