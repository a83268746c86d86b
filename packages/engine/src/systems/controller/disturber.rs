use rand::Rng;
use rapier2d::na::{Point2, Vector2};

use super::inputs::{ControlInputs, EnergyPhase};
use super::ranking::RankedStone;
use super::{BodyState, ControllerContext};

pub(super) fn apply(
    ctx: &mut ControllerContext<'_>,
    ranked: &[RankedStone],
    inputs: &ControlInputs,
    friction_scale: &mut [f32],
) {
    let tuning = *ctx.tuning();
    let d = inputs.disturber;
    let push = d * (1.0 + inputs.energy_ratio) * inputs.direction;
    let jitter = d * inputs.volatility;
    let phase = match inputs.energy_phase {
        EnergyPhase::Calm => tuning.phase_calm,
        EnergyPhase::Building => tuning.phase_building,
        EnergyPhase::Critical => tuning.phase_critical,
    };

    for (r, scale) in ranked.iter().zip(friction_scale.iter_mut()) {
        let stone = &ctx.stones[r.index];
        let Some(state) = BodyState::read(ctx.physics, stone.body) else {
            continue;
        };

        // Slip: less grip the harder we push.
        *scale *= 1.0 - (d * tuning.slip_gain * r.tier).min(tuning.max_slip);

        let noise = ctx.rng.gen_range(-1.0f32..=1.0) * d * tuning.angular_noise_gain * r.tier;
        let kick = if r.is_primary() && jitter > 0.0 {
            let dir_x = ctx.rng.gen_range(-1.0f32..=1.0);
            let dir_y = ctx.rng.gen_range(-0.25f32..=0.5);
            Some((dir_x, dir_y))
        } else {
            None
        };

        let Some(rb) = ctx.physics.body_mut(stone.body) else {
            continue;
        };

        rb.set_angvel(state.angvel + noise, true);

        if push != 0.0 {
            let top = state.to_world(stone.top_mid_body());
            let shear = push * tuning.shear_gain * state.mass * r.tier;
            rb.add_force_at_point(Vector2::new(shear, 0.0), Point2::new(top.x, top.y), true);
        }

        if let Some((dir_x, dir_y)) = kick {
            let contact = state.to_world(stone.bottom_mid_body());
            let amplitude = jitter * phase * tuning.jitter_gain * state.mass;
            rb.apply_impulse_at_point(
                Vector2::new(dir_x * amplitude, dir_y * amplitude),
                Point2::new(contact.x, contact.y),
                true,
            );
        }
    }
}
