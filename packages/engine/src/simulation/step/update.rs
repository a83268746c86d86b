use crate::systems::controller::{self, ControlInputs, ControllerContext, UpdateOptions};
use crate::systems::telemetry;

use super::perf_timer::timed;
use super::{PerfTimer, StackCore};

/// One simulation step: controller -> integrator -> telemetry.
///
/// A non-positive or non-finite `delta_time` is a no-op, so
/// `update(0.0, ..)` leaves every body exactly as it was.
pub(super) fn update(
    world: &mut StackCore,
    delta_time: f32,
    options: UpdateOptions,
    inputs: &ControlInputs,
) {
    if !(delta_time > 0.0) || !delta_time.is_finite() {
        return;
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.stone_count = world.stones.len() as u32;
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    if options.wake_bodies {
        for stone in &world.stones {
            if let Some(rb) = world.physics.body_mut(stone.body) {
                if rb.is_dynamic() {
                    rb.wake_up(true);
                }
            }
        }
    }

    // === FORCE CONTROLLER ===
    if options.apply_helpers {
        let mut ctx = ControllerContext {
            physics: &mut world.physics,
            stones: &world.stones,
            config: &world.config,
            rng: &mut world.rng,
            dt: delta_time,
        };
        let influenced = timed(perf_on, &mut world.perf_stats.controller_ms, || {
            controller::apply(&mut ctx, inputs)
        });
        world.perf_stats.influenced = influenced as u32;
    } else {
        // Helpers off: no leftover damping or friction from an earlier pass.
        controller::restore_materials(&mut world.physics, &world.stones, &world.config);
    }

    // === INTEGRATOR ===
    timed(perf_on, &mut world.perf_stats.integrate_ms, || {
        world.physics.step(delta_time);
    });
    world.physics.clear_forces();

    // === TELEMETRY ===
    timed(perf_on, &mut world.perf_stats.telemetry_ms, || {
        telemetry::extract(&world.physics, &world.stones, &mut world.telemetry);
    });

    world.time += delta_time as f64;
    world.frame += 1;

    if let Some(t0) = step_start {
        world.perf_stats.step_ms = t0.elapsed_ms();
        world.perf_stats.telemetry_entries = world.telemetry.len() as u32;
        world.perf_stats.contact_pairs = world
            .physics
            .narrow_phase()
            .contact_pairs()
            .filter(|p| p.has_any_active_contact)
            .count() as u32;
    }
}
