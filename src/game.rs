//! Turn-level operations built on the search.
//!
//! `ai_move` answers a single "engine, move here" request for a FEN, and
//! `self_play` lets the engine play both sides until the game ends.

use log::info;

use crate::error::{EngineError, EngineResult};
use crate::position::{ChessPosition, GameStatus, Rules};
use crate::search::Searcher;
use crate::types::{Color, Depth, Move};

/// Outcome of an engine move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiMove {
    pub mv: Move,
    /// Position after the move
    pub fen: String,
    /// Side to move after the move
    pub side_to_move: Color,
}

/// Search `fen` for the side to move, play the chosen move and report the
/// resulting position.
pub fn ai_move(fen: &str, max_depth: Depth) -> EngineResult<AiMove> {
    let mut position = ChessPosition::from_fen(fen)?;

    let status = position.status();
    if status.is_over() {
        return Err(EngineError::GameOver { status });
    }

    let side = position.side_to_move();
    let mv = Searcher::new()
        .get_best_move(&mut position, side, max_depth)?
        .ok_or(EngineError::GameOver { status })?;
    position.apply(mv);

    Ok(AiMove {
        mv,
        fen: position.fen(),
        side_to_move: position.side_to_move(),
    })
}

/// Record of an engine-vs-engine game.
#[derive(Debug, Clone)]
pub struct SelfPlay {
    pub moves: Vec<Move>,
    /// `Ongoing` when the ply cap ended the game
    pub status: GameStatus,
    pub final_fen: String,
}

/// Let the engine play both sides from `position` until the game ends or
/// `max_plies` moves have been made.
pub fn self_play(
    mut position: ChessPosition,
    max_depth: Depth,
    max_plies: usize,
) -> EngineResult<SelfPlay> {
    let mut searcher = Searcher::new();
    let mut moves = Vec::new();

    while moves.len() < max_plies && !position.is_terminal() {
        let side = position.side_to_move();
        let mv = match searcher.get_best_move(&mut position, side, max_depth)? {
            Some(mv) => mv,
            None => break,
        };
        position.apply(mv);
        info!("{}. {:?} {}", position.fullmove_number(), side, mv);
        moves.push(mv);
    }

    let status = position.status();
    info!("self-play finished after {} plies: {}", moves.len(), status);

    Ok(SelfPlay {
        moves,
        status,
        final_fen: position.fen(),
    })
}
