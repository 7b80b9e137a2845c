//! `chess::Board` wrapped in a push/pop frame stack.
//!
//! The `chess` crate is copy-make: `make_move_new` returns a fresh board.
//! Each applied move pushes one frame and each unapply pops it, so the search
//! owns a single mutable position and undo is exact by construction.

use std::fmt;
use std::str::FromStr;

use super::{GameStatus, Rules};
use crate::error::{EngineError, EngineResult};
use crate::types::{
    BitBoard, Board, BoardBuilder, BoardStatus, Color, Move, MoveGen, Piece, Square, ALL_SQUARES,
};

/// Dark squares, a1 included.
const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;

/// Half-moves without capture or pawn move after which the game ends.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position after which the game ends.
const FIVEFOLD: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq)]
struct Frame {
    board: Board,
    /// Move that led to this frame, `None` for the root
    played: Option<Move>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// A game position with reversible move application.
#[derive(Clone, PartialEq, Eq)]
pub struct ChessPosition {
    /// Never empty; the last frame is the current position
    frames: Vec<Frame>,
}

impl ChessPosition {
    /// Start a history at `board` with fresh move clocks.
    pub fn new(board: Board) -> Self {
        Self::with_clocks(board, 0, 1)
    }

    fn with_clocks(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Self {
            frames: vec![Frame {
                board,
                played: None,
                halfmove_clock,
                fullmove_number,
            }],
        }
    }

    /// Parse a FEN string, including the halfmove and fullmove fields when
    /// present.
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let fen = fen.trim();
        let invalid = || EngineError::InvalidFen { fen: fen.to_string() };

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(invalid());
        }
        let placement = format!("{} 0 1", fields[..4].join(" "));
        let builder = BoardBuilder::from_str(&placement).map_err(|_| invalid())?;
        // Board construction computes pins from the king square before its
        // own sanity check, so a missing king must be caught here.
        if !has_one_king_each(&builder) {
            return Err(invalid());
        }
        let board = Board::try_from(builder).map_err(|_| invalid())?;

        let halfmove_clock = match fields.get(4) {
            Some(f) => f.parse().map_err(|_| invalid())?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(f) => f.parse::<u32>().map_err(|_| invalid())?.max(1),
            None => 1,
        };

        Ok(Self::with_clocks(board, halfmove_clock, fullmove_number))
    }

    #[inline]
    fn top(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    /// Current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.top().board
    }

    /// Number of moves applied since construction.
    #[inline]
    pub fn ply(&self) -> usize {
        self.frames.len() - 1
    }

    /// Moves applied since construction, oldest first.
    pub fn history(&self) -> Vec<Move> {
        self.frames.iter().filter_map(|f| f.played).collect()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.top().halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.top().fullmove_number
    }

    /// FEN of the current position with the tracked move clocks.
    pub fn fen(&self) -> String {
        let board_fen = self.board().to_string();
        let fields: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    /// Game state of the current position.
    pub fn status(&self) -> GameStatus {
        match self.board().status() {
            BoardStatus::Checkmate => GameStatus::Checkmate,
            BoardStatus::Stalemate => GameStatus::Stalemate,
            BoardStatus::Ongoing => {
                if is_insufficient_material(self.board()) {
                    GameStatus::InsufficientMaterial
                } else if self.halfmove_clock() >= SEVENTY_FIVE_MOVE_PLIES {
                    GameStatus::SeventyFiveMoves
                } else if self.repetitions() >= FIVEFOLD {
                    GameStatus::FivefoldRepetition
                } else {
                    GameStatus::Ongoing
                }
            }
        }
    }

    /// How many times the current position has occurred since the last
    /// irreversible move, counting itself.
    fn repetitions(&self) -> usize {
        let hash = self.board().get_hash();
        let mut count = 0;
        for frame in self.frames.iter().rev() {
            if frame.board.get_hash() == hash {
                count += 1;
            }
            if frame.halfmove_clock == 0 {
                break;
            }
        }
        count
    }
}

fn has_one_king_each(builder: &BoardBuilder) -> bool {
    let kings = |color: Color| {
        ALL_SQUARES
            .iter()
            .filter(|&&sq| builder[sq] == Some((Piece::King, color)))
            .count()
    };
    kings(Color::White) == 1 && kings(Color::Black) == 1
}

impl fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChessPosition")
            .field("fen", &self.fen())
            .field("ply", &self.ply())
            .finish()
    }
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl Rules for ChessPosition {
    type Move = Move;

    #[inline]
    fn side_to_move(&self) -> Color {
        self.board().side_to_move()
    }

    #[inline]
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        let board = self.board();
        let piece = board.piece_on(square)?;
        let color = board.color_on(square)?;
        Some((piece, color))
    }

    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(self.board()).collect()
    }

    fn is_terminal(&self) -> bool {
        self.status().is_over()
    }

    fn apply(&mut self, mv: Move) {
        let top = *self.top();
        assert!(
            top.board.legal(mv),
            "apply: {} is not legal in {}",
            mv,
            self.fen()
        );

        let irreversible = top.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            || top.board.piece_on(mv.get_dest()).is_some();
        let halfmove_clock = if irreversible { 0 } else { top.halfmove_clock + 1 };
        let fullmove_number = match top.board.side_to_move() {
            Color::White => top.fullmove_number,
            Color::Black => top.fullmove_number + 1,
        };

        self.frames.push(Frame {
            board: top.board.make_move_new(mv),
            played: Some(mv),
            halfmove_clock,
            fullmove_number,
        });
    }

    fn unapply(&mut self, mv: Move) {
        assert!(self.frames.len() > 1, "unapply: {} without a matching apply", mv);
        assert_eq!(
            self.top().played,
            Some(mv),
            "unapply: {} does not match the last applied move",
            mv
        );
        self.frames.pop();
    }
}

/// Neither side can ever deliver mate.
fn is_insufficient_material(board: &Board) -> bool {
    side_has_insufficient_material(board, Color::White)
        && side_has_insufficient_material(board, Color::Black)
}

fn side_has_insufficient_material(board: &Board, color: Color) -> bool {
    let ours = *board.color_combined(color);
    let theirs = *board.color_combined(!color);
    let heavy = *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);

    if (ours & heavy).popcnt() > 0 {
        return false;
    }

    let knights = *board.pieces(Piece::Knight);
    if (ours & knights).popcnt() > 0 {
        // A lone knight can only mate with help from enemy blockers.
        let blockers = theirs & !*board.pieces(Piece::King) & !*board.pieces(Piece::Queen);
        return ours.popcnt() <= 2 && blockers.popcnt() == 0;
    }

    let bishops = *board.pieces(Piece::Bishop);
    if (ours & bishops).popcnt() > 0 {
        let dark = BitBoard::new(DARK_SQUARES);
        let same_colour = (bishops & dark).popcnt() == 0 || (bishops & !dark).popcnt() == 0;
        return same_colour
            && board.pieces(Piece::Pawn).popcnt() == 0
            && knights.popcnt() == 0;
    }

    true
}
