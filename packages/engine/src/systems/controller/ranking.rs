use crate::domain::config::ControllerTuning;
use crate::domain::stone::Stone;
use crate::systems::rigid_body::PhysicsWorld;

/// A stone selected for correction this step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedStone {
    /// Index into the world's stone list.
    pub index: usize,
    /// 0 = primary (topmost).
    pub rank: usize,
    /// Correction weight for this rank.
    pub tier: f32,
}

impl RankedStone {
    pub fn is_primary(&self) -> bool {
        self.rank == 0
    }
}

/// Top `influenced_count` non-static stones, highest first.
pub fn rank_top_stones(
    physics: &PhysicsWorld,
    stones: &[Stone],
    tuning: &ControllerTuning,
) -> Vec<RankedStone> {
    let mut heights: Vec<(usize, f32)> = stones
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_static)
        .filter_map(|(i, s)| {
            let rb = physics.body(s.body)?;
            if rb.is_dynamic() {
                Some((i, rb.translation().y))
            } else {
                None
            }
        })
        .collect();

    heights.sort_by(|a, b| b.1.total_cmp(&a.1));

    heights
        .into_iter()
        .take(tuning.influenced_count)
        .enumerate()
        .map(|(rank, (index, _))| RankedStone {
            index,
            rank,
            tier: if rank == 0 {
                tuning.tier_primary
            } else {
                tuning.tier_secondary
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Point;
    use crate::domain::stone::{StoneId, StoneParams};
    use crate::systems::rigid_body::StoneBodyDesc;

    fn stone_at(physics: &mut PhysicsWorld, id: u32, y: f32) -> Stone {
        let verts = [
            Point::new(-5.0, -5.0),
            Point::new(5.0, -5.0),
            Point::new(5.0, 5.0),
            Point::new(-5.0, 5.0),
        ];
        let desc = StoneBodyDesc::new(StoneId(id), &verts, &StoneParams::default(), Point::new(0.0, y)).unwrap();
        let (body, collider) = physics.insert_stone(&desc).unwrap();
        Stone {
            id: StoneId(id),
            body,
            collider,
            params: StoneParams::default(),
            vertices: desc.vertices.clone(),
            mass: desc.mass,
            color: 0,
            is_flipped: false,
            is_static: false,
            created_at: 0.0,
            top_angle: None,
            anchor: None,
            support_target_x: 0.0,
            target_body_angle: None,
        }
    }

    #[test]
    fn highest_dynamic_stones_come_first() {
        let mut physics = PhysicsWorld::new(Point::ZERO);
        let mut stones = vec![
            stone_at(&mut physics, 1, 10.0),
            stone_at(&mut physics, 2, 50.0),
            stone_at(&mut physics, 3, 30.0),
            stone_at(&mut physics, 4, 90.0),
            stone_at(&mut physics, 5, 70.0),
        ];
        stones[3].is_static = true;

        let ranked = rank_top_stones(&physics, &stones, &ControllerTuning::default());
        let order: Vec<u32> = ranked.iter().map(|r| stones[r.index].id.0).collect();
        assert_eq!(order, vec![5, 2, 3]);
        assert!(ranked[0].is_primary());
        assert_eq!(ranked[0].tier, ControllerTuning::default().tier_primary);
        assert_eq!(ranked[1].tier, ControllerTuning::default().tier_secondary);
    }
}
