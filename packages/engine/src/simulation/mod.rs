//! StackCore - the rigid-body world manager
//!
//! Owns the integrator and the stone arena. The core only orchestrates;
//! the work lives in:
//! - commands/ - stone creation and direct mutators
//! - step/     - one `update` (controller -> integrator -> telemetry)
//! - queries/  - snapshots, stability, tower height
//! - init/     - construction and runtime settings
//!
//! Stones are stored by value in a `Vec`; each one carries its own anchor
//! snapshot, so there are no references between stones.

use rand::rngs::SmallRng;

use crate::core::error::EngineError;
use crate::core::math::Point;
use crate::domain::config::StackConfig;
use crate::domain::stone::{Stone, StoneId, StoneParams, StoneSnapshot};
use crate::geometry::{AnchoredTrapezoid, TrapezoidGeometry};
use crate::systems::controller::{ControlInputs, UpdateOptions};
use crate::systems::rigid_body::PhysicsWorld;
use crate::systems::telemetry::StoneTelemetry;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/stones.rs"]
mod stones;
#[path = "commands/stacking.rs"]
mod stacking;
#[path = "step/update.rs"]
mod update;
#[path = "queries/stability.rs"]
mod stability;
mod facade;

pub use facade::{build_trapezoid_json, StackWorld};
pub use perf_stats::PerfStats;
pub use stacking::StackRequest;
pub use stones::StoneSpawn;

use perf_timer::PerfTimer;

/// The stacking world.
pub struct StackCore {
    config: StackConfig,
    physics: PhysicsWorld,
    stones: Vec<Stone>,
    next_id: u32,

    // Drained by `take_telemetry`, rebuilt every step.
    telemetry: Vec<StoneTelemetry>,

    // Disturber jitter source (seeded from config).
    rng: SmallRng,

    // Simulated seconds since creation / last clear.
    time: f64,
    // Steps since creation.
    frame: u64,

    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl StackCore {
    pub fn new() -> Self {
        init::create_stack_core(StackConfig::default())
    }

    pub fn with_config(config: StackConfig) -> Self {
        init::create_stack_core(config)
    }

    pub fn from_config_json(json: &str) -> Result<Self, EngineError> {
        let config = StackConfig::from_json(json)?;
        Ok(init::create_stack_core(config))
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn time(&self) -> f64 { self.time }

    pub fn stone_count(&self) -> usize { self.stones.len() }

    // === SETTINGS ===

    pub fn set_gravity(&mut self, gravity: Point) {
        settings::set_gravity(self, gravity);
    }

    pub fn gravity(&self) -> Point {
        settings::gravity(self)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }

    // === STONES ===

    /// Add a stone. Returns `None` (never panics) if the vertices or
    /// material cannot form a body.
    #[allow(clippy::too_many_arguments)]
    pub fn add_stone(
        &mut self,
        vertices: &[Point],
        params: StoneParams,
        x: f32,
        y: f32,
        color: u32,
        top_angle: Option<f32>,
        anchor: Option<AnchoredTrapezoid>,
        support_target_x: Option<f32>,
    ) -> Option<StoneId> {
        let mut spawn = StoneSpawn::new(vertices.to_vec(), params, Point::new(x, y)).with_color(color);
        spawn.top_angle = top_angle;
        spawn.anchor = anchor;
        spawn.support_target_x = support_target_x;
        stones::spawn_stone(self, spawn)
    }

    pub fn spawn_stone(&mut self, spawn: StoneSpawn) -> Option<StoneId> {
        stones::spawn_stone(self, spawn)
    }

    /// Build a trapezoid on top of the current stack and add it.
    pub fn stack_stone(&mut self, request: &StackRequest) -> Option<StoneId> {
        stacking::stack_stone(self, request)
    }

    /// Convenience: stack a stone with flat, untilted edges.
    pub fn stack_simple(&mut self, geometry: TrapezoidGeometry, params: StoneParams, color: u32) -> Option<StoneId> {
        stacking::stack_stone(self, &StackRequest::new(geometry, params).with_color(color))
    }

    pub fn remove_stone(&mut self, id: StoneId) {
        stones::remove_stone(self, id);
    }

    pub fn set_stone_static(&mut self, id: StoneId, is_static: bool) {
        stones::set_stone_static(self, id, is_static);
    }

    pub fn set_stone_angle(&mut self, id: StoneId, angle: f32) {
        stones::set_stone_angle(self, id, angle);
    }

    /// Force for the next step only. `at` is a world point; `None` pushes
    /// through the center of mass.
    pub fn apply_force(&mut self, id: StoneId, force: Point, at: Option<Point>) {
        stones::apply_force(self, id, force, at);
    }

    pub fn flip_stone(&mut self, id: StoneId) {
        stones::flip_stone(self, id);
    }

    /// Zero every velocity and put the world to sleep.
    pub fn stabilize_bodies(&mut self) {
        stones::stabilize_bodies(self);
    }

    /// Remove every stone and restart the clock. The ground stays; ids are
    /// never reused.
    pub fn clear(&mut self) {
        stones::clear(self);
    }

    pub fn stone(&self, id: StoneId) -> Option<&Stone> {
        self.stones.iter().find(|s| s.id == id)
    }

    /// Topmost stone by current height.
    pub fn top_stone(&self) -> Option<&Stone> {
        stability::top_stone(self)
    }

    // === STEP ===

    /// Advance the simulation by one step of `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32, options: UpdateOptions, inputs: &ControlInputs) {
        update::update(self, delta_time, options, inputs);
    }

    /// Telemetry of the last step. Empties the buffer.
    pub fn take_telemetry(&mut self) -> Vec<StoneTelemetry> {
        std::mem::take(&mut self.telemetry)
    }

    // === QUERIES ===

    pub fn stones(&self) -> Vec<StoneSnapshot> {
        stability::snapshots(self)
    }

    pub fn stone_snapshot(&self, id: StoneId) -> Option<StoneSnapshot> {
        stability::snapshot(self, id)
    }

    pub fn is_stone_stable(&self, id: StoneId, threshold: f32) -> bool {
        stability::is_stone_stable(self, id, threshold)
    }

    pub fn detect_tumble(&self, threshold: f32) -> Vec<StoneId> {
        stability::detect_tumble(self, threshold)
    }

    pub fn tower_height(&self) -> f32 {
        stability::tower_height(self)
    }

    pub fn tower_height_rotated(&self) -> f32 {
        stability::tower_height_rotated(self)
    }
}

impl Default for StackCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
