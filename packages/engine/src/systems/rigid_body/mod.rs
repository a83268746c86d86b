//! Rigid-body integration backed by rapier2d.
//!
//! The engine keeps its own `Point` type everywhere; nalgebra only appears
//! inside this module.

mod body;
pub(crate) mod convert;
mod world;

pub use body::StoneBodyDesc;
pub use world::PhysicsWorld;
