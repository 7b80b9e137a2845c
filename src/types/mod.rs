//! Core types for the engine.
//!
//! Board, move, square, piece and colour types come straight from the `chess`
//! crate so there is a single source of truth for them. The engine only adds
//! its own score and depth wrappers plus material values.

mod depth;
mod score;

pub use depth::Depth;
pub use score::{Score, SCORE_INFINITY};

pub use chess::{
    BitBoard,
    Board,
    BoardBuilder,
    BoardStatus,
    ChessMove as Move,
    Color,
    MoveGen,
    Piece,
    Square,
    ALL_SQUARES,
};

/// Node count type
pub type NodeCount = u64;

/// Score unit used for material and table entries
pub type Value = i32;

pub const PAWN_VALUE: Value = 10;
pub const KNIGHT_VALUE: Value = 30;
pub const BISHOP_VALUE: Value = 30;
pub const ROOK_VALUE: Value = 50;
pub const QUEEN_VALUE: Value = 90;
pub const KING_VALUE: Value = 900;

/// Material value of a piece
#[inline]
pub const fn piece_value(piece: Piece) -> Value {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}
