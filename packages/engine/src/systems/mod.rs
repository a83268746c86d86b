//! Per-step systems driven by `StackCore`.

pub mod controller;
pub mod rigid_body;
pub mod telemetry;
