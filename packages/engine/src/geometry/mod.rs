//! Procedural stone geometry.
//!
//! - [`trapezoid`] - closed-form slanted quadrilateral with filleted corners
//! - [`fillet`] - corner rounding pass
//! - [`polygon`] - shoelace area / centroid helpers
//! - [`anchor`] - placing a stone on top of the previous one

pub mod anchor;
pub mod fillet;
pub mod polygon;
pub mod trapezoid;

pub use anchor::{anchor_next, ground_anchor, AnchoredTrapezoid, Transform};
pub use trapezoid::{
    build_trapezoid, TrapezoidGeometry, TrapezoidMetrics, TrapezoidParams, TrapezoidResult,
};
