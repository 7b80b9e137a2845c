//! Static evaluation.
//!
//! Material plus piece-square bonus for every occupied square, summed from
//! White's point of view. Finished games get no special treatment: a mated
//! side is scored only by what is left on the board.

pub mod pst;

use crate::position::Rules;
use crate::types::{piece_value, Color, Piece, Score, Value, ALL_SQUARES};

/// Pieces on the board at or below which the endgame king table applies.
pub const ENDGAME_PIECE_LIMIT: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Midgame,
    Endgame,
}

impl GamePhase {
    /// Endgame once the queens are gone or few pieces remain.
    pub fn of<P: Rules + ?Sized>(position: &P) -> Self {
        let mut pieces = 0;
        let mut queens = 0;
        for &sq in ALL_SQUARES.iter() {
            if let Some((piece, _)) = position.piece_at(sq) {
                pieces += 1;
                if piece == Piece::Queen {
                    queens += 1;
                }
            }
        }
        if queens == 0 || pieces <= ENDGAME_PIECE_LIMIT {
            GamePhase::Endgame
        } else {
            GamePhase::Midgame
        }
    }
}

/// Evaluate the position from White's perspective.
pub fn evaluate<P: Rules + ?Sized>(position: &P) -> Score {
    let phase = GamePhase::of(position);
    let mut total: Value = 0;

    for &sq in ALL_SQUARES.iter() {
        if let Some((piece, color)) = position.piece_at(sq) {
            let value = piece_value(piece) + pst::table(piece, phase)[sq.to_index()];
            match color {
                Color::White => total += value,
                Color::Black => total -= value,
            }
        }
    }

    Score::cp(total)
}
