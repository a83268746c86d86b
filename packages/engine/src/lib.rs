//! Cairn Engine - rigid-body stone stacking in WASM
//!
//! Architecture:
//! - core/       - math, errors, logging
//! - domain/     - stones, materials, configuration
//! - geometry/   - trapezoid builder and anchoring (pure)
//! - systems/    - integrator, force controller, telemetry
//! - simulation/ - StackCore orchestration and the JS facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod geometry;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Cairn engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::error::{EngineError, StoneRejection};
pub use crate::core::math::Point;
pub use domain::{StackConfig, StoneId, StoneParams, StoneSnapshot};
pub use geometry::{
    anchor_next, build_trapezoid, AnchoredTrapezoid, Transform, TrapezoidGeometry,
    TrapezoidMetrics, TrapezoidParams, TrapezoidResult,
};
pub use simulation::{build_trapezoid_json, PerfStats, StackCore, StackRequest, StackWorld, StoneSpawn};
pub use systems::controller::{ControlInputs, EnergyPhase, UpdateOptions};
pub use systems::telemetry::{ContactEvent, StoneTelemetry};
