//! Position access for evaluation and search.
//!
//! The search never looks inside a board. Everything it needs goes through
//! the [`Rules`] trait: piece lookups for the evaluator, legal move
//! enumeration, terminal detection and a strict apply/unapply stack.
//! [`ChessPosition`] implements it on top of the `chess` crate.

mod stack;

pub use stack::ChessPosition;

use std::fmt;

use crate::types::{Color, Piece, Square};

/// The rules-engine contract the evaluator and search are written against.
///
/// `apply` and `unapply` must be exact inverses and follow push/pop order:
/// `unapply(m)` is only valid directly after the matching `apply(m)`.
/// Violations are programming errors and implementations panic on them.
pub trait Rules {
    /// Move token. The search only compares, copies and prints it.
    type Move: Copy + Eq + fmt::Display + fmt::Debug;

    fn side_to_move(&self) -> Color;

    /// Piece and owner on a square, `None` when empty.
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;

    /// Legal moves in a deterministic order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// True when the game has ended for any reason.
    fn is_terminal(&self) -> bool;

    fn apply(&mut self, mv: Self::Move);

    fn unapply(&mut self, mv: Self::Move);
}

/// Why a game is (or is not) over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::InsufficientMaterial => "insufficient material",
            GameStatus::SeventyFiveMoves => "seventy-five-move rule",
            GameStatus::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(s)
    }
}
