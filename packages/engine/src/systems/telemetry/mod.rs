//! Contact / velocity telemetry.
//!
//! Read after each integrator step from the narrow phase's public contact
//! pairs. The buffer is rebuilt every step and drained by the consumer.

mod extract;

pub use extract::{extract, ContactEvent, StoneTelemetry};
