//! Error types for cairn-engine.

use thiserror::Error;

use crate::domain::stone::StoneId;

/// Why a stone could not be turned into a simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoneRejection {
    /// Fewer than three vertices were supplied.
    #[error("need at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A vertex, position or material value was NaN or infinite.
    #[error("non-finite input")]
    NonFinite,

    /// The polygon encloses no area.
    #[error("polygon has zero area")]
    ZeroArea,

    /// The integrator could not build a collider from the vertices.
    #[error("collider construction failed")]
    ColliderFailed,
}

/// Errors surfaced by the engine's fallible entry points.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Configuration JSON could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),

    /// A stone could not be built.
    #[error("invalid stone: {0}")]
    InvalidStone(#[from] StoneRejection),

    /// No stone with the given id exists.
    #[error("unknown stone: {0}")]
    UnknownStone(StoneId),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Config(e.to_string())
    }
}
