use crate::core::math::Point;

use super::perf_stats::PerfStats;
use super::StackCore;

pub(super) fn enable_perf_metrics(world: &mut StackCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn perf_stats(world: &StackCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_gravity(world: &mut StackCore, gravity: Point) {
    if !gravity.is_finite() {
        return;
    }
    world.config.gravity = gravity;
    world.physics.set_gravity(gravity);
}

pub(super) fn gravity(world: &StackCore) -> Point {
    world.physics.gravity()
}
