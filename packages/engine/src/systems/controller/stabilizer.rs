use rapier2d::na::Vector2;

use crate::core::math::angle_delta;

use super::inputs::ControlInputs;
use super::ranking::RankedStone;
use super::{BodyState, ControllerContext};

pub(super) fn apply(
    ctx: &mut ControllerContext<'_>,
    ranked: &[RankedStone],
    inputs: &ControlInputs,
    friction_scale: &mut [f32],
) {
    let tuning = *ctx.tuning();
    let s = inputs.stabilizer;
    let boost = s * (1.0 + inputs.energy_ratio);
    // Explicit drag above 1/dt would reverse velocity in a single step.
    let max_drag = if ctx.dt > 0.0 { 0.5 / ctx.dt } else { 0.0 };

    for (r, scale) in ranked.iter().zip(friction_scale.iter_mut()) {
        let stone = &ctx.stones[r.index];
        let Some(state) = BodyState::read(ctx.physics, stone.body) else {
            continue;
        };

        // === friction / damping ===
        *scale *= 1.0 + tuning.surface_friction_gain * boost * r.tier;
        let lin_damping = ctx.config.base_linear_damping + tuning.air_damping_gain * boost * r.tier;
        let ang_damping =
            ctx.config.base_angular_damping + tuning.angular_damping_gain * boost * r.tier;

        let drag = (tuning.velocity_damping_gain * boost * r.tier).min(max_drag);
        let drag_force = state.linvel * (-drag * state.mass);

        let Some(rb) = ctx.physics.body_mut(stone.body) else {
            continue;
        };
        rb.set_linear_damping(lin_damping);
        rb.set_angular_damping(ang_damping);
        rb.add_force(Vector2::new(drag_force.x, drag_force.y), true);

        // === settle near-resting support stones ===
        if !r.is_primary() {
            let resting = state.linvel.length() < tuning.rest_linear_speed
                && state.angvel.abs() < tuning.rest_angular_speed;
            if resting {
                let v = state.linvel * tuning.rest_velocity_scale;
                rb.set_linvel(Vector2::new(v.x, v.y), false);
                rb.set_angvel(state.angvel * tuning.rest_velocity_scale, false);
            }
            continue;
        }

        // === primary: horizontal support controller ===
        let bottom = state.to_world(stone.bottom_mid_body());
        let error_x = stone.support_target_x - bottom.x;
        let accel = (error_x * tuning.support_gain * s - state.linvel.x * tuning.support_damping * s)
            .clamp(-tuning.max_support_accel, tuning.max_support_accel);
        rb.add_force(Vector2::new(accel * state.mass, 0.0), true);

        // === primary: rotational controller ===
        if let Some(target) = stone.target_body_angle {
            let current_face = stone.face_angle_at(state.angle);
            let target_face = stone.face_angle_at(target);
            let error = angle_delta(current_face, target_face);
            let correction = (error * tuning.rotation_gain * s * ctx.dt)
                .clamp(-tuning.max_angular_correction, tuning.max_angular_correction);
            rb.set_angvel(state.angvel + correction, true);
        }
    }
}
