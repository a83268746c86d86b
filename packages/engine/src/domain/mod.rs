//! Domain data: stones, materials, world configuration.

pub mod config;
pub mod stone;

pub use config::{ControllerTuning, GroundConfig, StackConfig};
pub use stone::{Stone, StoneId, StoneParams, StoneSnapshot};
