use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::math::Point;

/// World configuration.
///
/// Every field has a default, so a partial JSON object is enough:
/// `{"gravity": {"x": 0, "y": -600}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Gravity acceleration (Y-up world, so a negative `y` pulls down).
    pub gravity: Point,
    pub ground: GroundConfig,
    /// Linear damping every stone starts each step with ("air friction").
    pub base_linear_damping: f32,
    pub base_angular_damping: f32,
    /// Seed for the disturber's jitter generator.
    pub jitter_seed: u64,
    pub controller: ControllerTuning,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            gravity: Point::new(0.0, -980.0),
            ground: GroundConfig::default(),
            base_linear_damping: 0.05,
            base_angular_damping: 0.05,
            jitter_seed: 0x5eed_ca1e,
            controller: ControllerTuning::default(),
        }
    }
}

impl StackConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: StackConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), EngineError> {
        if !self.gravity.is_finite() {
            return Err(EngineError::Config("gravity must be finite".to_string()));
        }
        if self.ground.enabled && (self.ground.half_width <= 0.0 || self.ground.thickness <= 0.0) {
            return Err(EngineError::Config(
                "ground half_width and thickness must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Static slab the first stone rests on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub enabled: bool,
    /// World Y of the ground's top surface.
    pub top_y: f32,
    pub center_x: f32,
    pub half_width: f32,
    pub thickness: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            top_y: 0.0,
            center_x: 0.0,
            half_width: 2000.0,
            thickness: 40.0,
            friction: 0.8,
            restitution: 0.0,
        }
    }
}

/// Gains and clamps for the force controller.
///
/// Rank 0 is the primary (topmost) stone; ranks 1..`influenced_count` are
/// the other top stones. Everything below gets nothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerTuning {
    pub influenced_count: usize,
    /// Correction weight for the primary stone.
    pub tier_primary: f32,
    /// Correction weight for the other influenced stones.
    pub tier_secondary: f32,

    // === stabilizer ===
    pub air_damping_gain: f32,
    pub angular_damping_gain: f32,
    pub surface_friction_gain: f32,
    pub max_friction: f32,
    pub velocity_damping_gain: f32,
    pub rest_linear_speed: f32,
    pub rest_angular_speed: f32,
    /// Multiplier applied to residual velocity of near-resting stones.
    pub rest_velocity_scale: f32,
    pub support_gain: f32,
    pub support_damping: f32,
    pub max_support_accel: f32,
    pub rotation_gain: f32,
    /// Largest angular velocity change the rotational controller may add in one step.
    pub max_angular_correction: f32,

    // === disturber ===
    pub angular_noise_gain: f32,
    pub shear_gain: f32,
    pub slip_gain: f32,
    pub max_slip: f32,
    pub jitter_gain: f32,
    pub phase_calm: f32,
    pub phase_building: f32,
    pub phase_critical: f32,

    // === gravity bias ===
    pub bias_primary_share: f32,
    pub bias_secondary_share: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            influenced_count: 3,
            tier_primary: 1.0,
            tier_secondary: 0.5,

            air_damping_gain: 0.6,
            angular_damping_gain: 1.0,
            surface_friction_gain: 0.5,
            max_friction: 1.5,
            velocity_damping_gain: 1.5,
            rest_linear_speed: 4.0,
            rest_angular_speed: 0.05,
            rest_velocity_scale: 0.5,
            support_gain: 3.0,
            support_damping: 1.5,
            max_support_accel: 600.0,
            rotation_gain: 4.0,
            max_angular_correction: 0.4,

            angular_noise_gain: 0.08,
            shear_gain: 250.0,
            slip_gain: 0.35,
            max_slip: 0.85,
            jitter_gain: 30.0,
            phase_calm: 0.4,
            phase_building: 1.0,
            phase_critical: 1.8,

            bias_primary_share: 0.75,
            bias_secondary_share: 0.20,
        }
    }
}
