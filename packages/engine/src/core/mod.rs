//! Core functionality: math, logging, errors.

#[macro_use]
pub mod utils;
pub mod error;
pub mod math;

pub use error::{EngineError, StoneRejection};
