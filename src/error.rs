//! Error types for engine operations.

use thiserror::Error;

use crate::position::GameStatus;

/// Errors surfaced to callers of the engine.
///
/// Broken collaborator contracts (unapply without apply, an illegal move
/// handed to apply) are not represented here; those panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Requested search depth is zero or negative
    #[error("Invalid search depth: {depth} (must be at least 1)")]
    InvalidDepth { depth: i32 },

    /// FEN string could not be parsed into a sane position
    #[error("Invalid FEN: {fen}")]
    InvalidFen { fen: String },

    /// Move text does not match any legal move in the position
    #[error("Illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    /// The position is already finished
    #[error("Game over: {status}")]
    GameOver { status: GameStatus },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
