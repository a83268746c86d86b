use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::domain::config::StackConfig;
use crate::systems::rigid_body::PhysicsWorld;

use super::{PerfStats, StackCore};

pub(super) fn create_stack_core(config: StackConfig) -> StackCore {
    let mut physics = PhysicsWorld::new(config.gravity);
    physics.insert_ground(&config.ground);

    StackCore {
        rng: SmallRng::seed_from_u64(config.jitter_seed),
        config,
        physics,
        stones: Vec::new(),
        next_id: 1,
        telemetry: Vec::new(),
        time: 0.0,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
