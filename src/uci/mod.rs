//! UCI (Universal Chess Interface) protocol front end.
//!
//! Enough of the protocol to drive the engine from a GUI or a script:
//! positions in, `bestmove` out. Searches are depth-limited only; clock
//! parameters on `go` are accepted and ignored.

mod handler;
mod parser;

pub use handler::UciHandler;
pub use parser::{parse_command, UciCommand};

use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::position::{ChessPosition, Rules};
use crate::types::{Board, Depth, Move, MoveGen, Piece, Square};

/// UCI engine identification
pub const ENGINE_NAME: &str = "AlphaBetaChess";
pub const ENGINE_AUTHOR: &str = "alphabeta-chess developers";

/// Parameters from a "go" command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Search to this depth
    pub depth: Option<Depth>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create params for a fixed depth search
    pub fn fixed_depth(depth: i32) -> Self {
        Self {
            depth: Some(Depth::new(depth)),
        }
    }
}

/// Parse a move string (e.g., "e2e4", "e7e8q") into a legal Move for the board
pub fn parse_move(board: &Board, move_str: &str) -> Option<Move> {
    let move_str = move_str.trim();
    if move_str.len() < 4 || !move_str.is_ascii() {
        return None;
    }

    let from = Square::from_str(&move_str[0..2]).ok()?;
    let to = Square::from_str(&move_str[2..4]).ok()?;

    let promo = match move_str.chars().nth(4) {
        None => None,
        Some('q') | Some('Q') => Some(Piece::Queen),
        Some('r') | Some('R') => Some(Piece::Rook),
        Some('b') | Some('B') => Some(Piece::Bishop),
        Some('n') | Some('N') => Some(Piece::Knight),
        Some(_) => return None,
    };

    MoveGen::new_legal(board).find(|m| {
        m.get_source() == from && m.get_dest() == to && m.get_promotion() == promo
    })
}

/// Parse `move_str` against the current position and play it.
pub fn play_move(position: &mut ChessPosition, move_str: &str) -> EngineResult<Move> {
    let m = parse_move(position.board(), move_str).ok_or_else(|| EngineError::IllegalMove {
        mv: move_str.to_string(),
        fen: position.fen(),
    })?;
    position.apply(m);
    Ok(m)
}

/// Format a move to UCI notation (e.g., "e2e4", "e7e8q")
pub fn format_move(m: Move) -> String {
    let mut s = format!("{}{}", m.get_source(), m.get_dest());
    if let Some(promo) = m.get_promotion() {
        let c = match promo {
            Piece::Queen => 'q',
            Piece::Rook => 'r',
            Piece::Bishop => 'b',
            Piece::Knight => 'n',
            Piece::Pawn | Piece::King => return s,
        };
        s.push(c);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_move() {
        let board = Board::default();
        let m = parse_move(&board, "e2e4").unwrap();
        assert_eq!(format_move(m), "e2e4");
        assert!(parse_move(&board, "e2e5").is_none());
        assert!(parse_move(&board, "e2").is_none());
        assert!(parse_move(&board, "e2e4x").is_none());
    }

    #[test]
    fn test_promotion_moves() {
        let board = Board::from_str("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let m = parse_move(&board, "a7a8n").unwrap();
        assert_eq!(m.get_promotion(), Some(Piece::Knight));
        assert_eq!(format_move(m), "a7a8n");
        // A promotion always needs its piece letter.
        assert!(parse_move(&board, "a7a8").is_none());
    }

    #[test]
    fn test_play_move() {
        let mut position = ChessPosition::default();
        let m = play_move(&mut position, "g1f3").unwrap();
        assert_eq!(format_move(m), "g1f3");
        assert_eq!(position.ply(), 1);

        let err = play_move(&mut position, "g1f3").unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalMove {
                mv: "g1f3".into(),
                fen: "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1".into(),
            }
        );
        assert_eq!(position.ply(), 1);
    }
}
