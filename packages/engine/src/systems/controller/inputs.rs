use serde::{Deserialize, Serialize};

use crate::core::math::Point;

/// External energy regime; scales disturber jitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyPhase {
    #[default]
    Calm,
    Building,
    Critical,
}

impl EnergyPhase {
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => EnergyPhase::Building,
            2 => EnergyPhase::Critical,
            _ => EnergyPhase::Calm,
        }
    }
}

/// Control signals for one `update` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInputs {
    /// Holding strength, >= 0.
    pub stabilizer: f32,
    /// Toppling strength, >= 0.
    pub disturber: f32,
    /// Lean direction: -1, 0 or 1.
    pub direction: f32,
    pub energy_phase: EnergyPhase,
    /// [0, 2]
    pub energy_ratio: f32,
    /// [0, 2]
    pub volatility: f32,
    pub gravity_bias: Point,
}

impl ControlInputs {
    pub fn stabilizing(stabilizer: f32) -> Self {
        Self { stabilizer, ..Self::default() }
    }

    pub fn disturbing(disturber: f32, direction: f32) -> Self {
        Self { disturber, direction, ..Self::default() }
    }

    /// Clamp every field into its documented range; NaN becomes 0.
    pub fn sanitized(&self) -> Self {
        let direction = finite(self.direction);
        Self {
            stabilizer: finite(self.stabilizer).max(0.0),
            disturber: finite(self.disturber).max(0.0),
            direction: if direction > 0.0 {
                1.0
            } else if direction < 0.0 {
                -1.0
            } else {
                0.0
            },
            energy_phase: self.energy_phase,
            energy_ratio: finite(self.energy_ratio).clamp(0.0, 2.0),
            volatility: finite(self.volatility).clamp(0.0, 2.0),
            gravity_bias: if self.gravity_bias.is_finite() {
                self.gravity_bias
            } else {
                Point::ZERO
            },
        }
    }
}

/// Per-call switches for `StackCore::update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOptions {
    /// Run the force controller this step.
    pub apply_helpers: bool,
    /// Wake every sleeping body before stepping.
    pub wake_bodies: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            apply_helpers: true,
            wake_bodies: false,
        }
    }
}

#[inline]
fn finite(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_and_quantizes_direction() {
        let raw = ControlInputs {
            stabilizer: -1.0,
            disturber: f32::NAN,
            direction: 0.3,
            energy_ratio: 5.0,
            volatility: -2.0,
            gravity_bias: Point::new(f32::INFINITY, 0.0),
            ..ControlInputs::default()
        };
        let s = raw.sanitized();
        assert_eq!(s.stabilizer, 0.0);
        assert_eq!(s.disturber, 0.0);
        assert_eq!(s.direction, 1.0);
        assert_eq!(s.energy_ratio, 2.0);
        assert_eq!(s.volatility, 0.0);
        assert_eq!(s.gravity_bias, Point::ZERO);
    }

    #[test]
    fn phase_parses_lowercase() {
        let p: EnergyPhase = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(p, EnergyPhase::Critical);
    }
}
