use rapier2d::na::Vector2;

use crate::core::math::Point;

use super::ranking::RankedStone;
use super::{BodyState, ControllerContext};

/// Mass-scaled lean force: most of it on the primary, a little on the
/// other top stones.
pub(super) fn apply(ctx: &mut ControllerContext<'_>, ranked: &[RankedStone], bias: Point) {
    let tuning = *ctx.tuning();
    for r in ranked {
        let share = if r.is_primary() {
            tuning.bias_primary_share
        } else {
            tuning.bias_secondary_share
        };
        let stone = &ctx.stones[r.index];
        let Some(state) = BodyState::read(ctx.physics, stone.body) else {
            continue;
        };
        let force = bias * (state.mass * share);
        if let Some(rb) = ctx.physics.body_mut(stone.body) {
            rb.add_force(Vector2::new(force.x, force.y), true);
        }
    }
}
