//! Search module for the engine.
//!
//! # Architecture
//! - `Searcher`: root driver, iterates depth budgets and keeps statistics
//! - `minimax`: recursive alpha-beta search over a [`Rules`] position
//! - `limits`: depth limit configuration
//!
//! The root driver restarts its bookkeeping at every depth and carries
//! nothing from one iteration to the next, so the move it returns is the one
//! a single scan at `max_depth` would pick. Root children are searched with
//! `maximizing` set from the root side, not from the side now to move.

mod limits;
mod minimax;

pub use limits::{SearchLimits, DEFAULT_DEPTH};
pub use minimax::{search, SearchResult};

use std::time::Instant;

use log::{debug, info, trace};

use crate::error::{EngineError, EngineResult};
use crate::position::Rules;
use crate::types::{Color, Depth, NodeCount, Score};

/// Search statistics collected during search
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes: NodeCount,
    /// Last completed iteration
    pub depth: Depth,
    /// Root value of the chosen move at the last iteration
    pub score: Score,
    pub time_ms: u64,
}

impl SearchStats {
    pub fn nps(&self) -> u64 {
        if self.time_ms > 0 {
            self.nodes * 1000 / self.time_ms
        } else {
            0
        }
    }
}

/// Root search controller
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Increment node counter
    #[inline]
    pub fn inc_nodes(&mut self) {
        self.stats.nodes += 1;
    }

    /// Pick a move for `side` by iterating depths `1..=max_depth`.
    ///
    /// Returns `Ok(None)` when the position has no legal moves. The position
    /// is borrowed mutably for the duration and is left exactly as it was.
    pub fn get_best_move<P: Rules>(
        &mut self,
        position: &mut P,
        side: Color,
        max_depth: Depth,
    ) -> EngineResult<Option<P::Move>> {
        if max_depth.raw() < 1 {
            return Err(EngineError::InvalidDepth {
                depth: max_depth.raw(),
            });
        }

        self.stats = SearchStats::default();
        let start = Instant::now();
        let maximizing = side == Color::White;
        let mut best_move = None;

        for depth in 1..=max_depth.raw() {
            let mut best_value = if maximizing {
                Score::neg_infinity()
            } else {
                Score::infinity()
            };

            for mv in position.legal_moves() {
                position.apply(mv);
                let result = search(
                    self,
                    position,
                    Depth::new(depth - 1),
                    Score::neg_infinity(),
                    Score::infinity(),
                    maximizing,
                );
                position.unapply(mv);
                trace!("depth {} root {} -> {}", depth, mv, result.score);

                let better = if maximizing {
                    result.score > best_value
                } else {
                    result.score < best_value
                };
                if better {
                    best_value = result.score;
                    best_move = Some(mv);
                }
            }

            self.stats.depth = Depth::new(depth);
            self.stats.score = best_value;
            match best_move {
                Some(mv) => debug!(
                    "depth {} best {} {} nodes {}",
                    depth, mv, best_value, self.stats.nodes
                ),
                None => debug!("depth {} no legal moves", depth),
            }
        }

        self.stats.time_ms = start.elapsed().as_millis() as u64;
        match best_move {
            Some(mv) => info!(
                "{:?} plays {} ({}, depth {}, {} nodes, {} ms)",
                side, mv, self.stats.score, max_depth, self.stats.nodes, self.stats.time_ms
            ),
            None => info!("{:?} has no legal moves", side),
        }

        Ok(best_move)
    }

    /// Run with a [`SearchLimits`] configuration.
    pub fn search<P: Rules>(
        &mut self,
        position: &mut P,
        side: Color,
        limits: SearchLimits,
    ) -> EngineResult<Option<P::Move>> {
        let depth = limits.validate()?;
        self.get_best_move(position, side, depth)
    }
}

/// Best move for `side` at `position`, searching up to `max_depth` plies.
pub fn get_best_move<P: Rules>(
    position: &mut P,
    side: Color,
    max_depth: Depth,
) -> EngineResult<Option<P::Move>> {
    Searcher::new().get_best_move(position, side, max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluate;
    use crate::position::ChessPosition;
    use crate::types::Move;
    use std::str::FromStr;

    fn position(fen: &str) -> ChessPosition {
        ChessPosition::from_fen(fen).unwrap()
    }

    /// One root scan at `depth - 1` with the same comparator as the driver.
    fn single_scan(position: &mut ChessPosition, side: Color, depth: i32) -> Option<Move> {
        let maximizing = side == Color::White;
        let mut searcher = Searcher::new();
        let mut best = None;
        let mut best_value = if maximizing {
            Score::neg_infinity()
        } else {
            Score::infinity()
        };
        for mv in position.legal_moves() {
            position.apply(mv);
            let score = search(
                &mut searcher,
                position,
                Depth::new(depth - 1),
                Score::neg_infinity(),
                Score::infinity(),
                maximizing,
            )
            .score;
            position.unapply(mv);
            if (maximizing && score > best_value) || (!maximizing && score < best_value) {
                best_value = score;
                best = Some(mv);
            }
        }
        best
    }

    #[test]
    fn test_invalid_depth() {
        let mut pos = ChessPosition::default();
        for d in [0, -1] {
            assert_eq!(
                get_best_move(&mut pos, Color::White, Depth::new(d)),
                Err(EngineError::InvalidDepth { depth: d })
            );
        }
        assert!(Searcher::new()
            .search(&mut pos, Color::White, SearchLimits::depth(0))
            .is_err());
    }

    #[test]
    fn test_no_legal_moves_returns_none() {
        let mut mated = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(get_best_move(&mut mated, Color::White, Depth::new(2)), Ok(None));

        let mut stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(get_best_move(&mut stalemate, Color::Black, Depth::new(3)), Ok(None));
    }

    #[test]
    fn test_start_position_depth_one_is_deterministic() {
        let mut pos = ChessPosition::default();

        // Expected: first move in generator order with the best static score.
        let mut expected = None;
        let mut best = Score::neg_infinity();
        for mv in pos.legal_moves() {
            pos.apply(mv);
            let score = evaluate(&pos);
            pos.unapply(mv);
            if score > best {
                best = score;
                expected = Some(mv);
            }
        }

        let first = get_best_move(&mut pos, Color::White, Depth::ONE).unwrap();
        let second = get_best_move(&mut pos, Color::White, Depth::ONE).unwrap();
        assert_eq!(first, expected);
        assert_eq!(first, second);
    }

    #[test]
    fn test_knight_takes_hanging_queen() {
        let capture = Move::new(
            crate::types::Square::from_str("e6").unwrap(),
            crate::types::Square::from_str("d4").unwrap(),
            None,
        );
        for depth in 1..=2 {
            let mut pos = position("4k3/8/4n3/8/3Q4/8/8/7K b - - 0 1");
            let mv = get_best_move(&mut pos, Color::Black, Depth::new(depth)).unwrap();
            assert_eq!(mv, Some(capture), "depth {}", depth);
        }
    }

    #[test]
    fn test_driver_equals_single_scan() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in fens {
            let mut pos = position(fen);
            for side in [Color::White, Color::Black] {
                for depth in 1..=3 {
                    let expected = single_scan(&mut pos, side, depth);
                    let got = get_best_move(&mut pos, side, Depth::new(depth)).unwrap();
                    assert_eq!(got, expected, "{} {:?} depth {}", fen, side, depth);
                }
            }
        }
    }

    #[test]
    fn test_best_move_is_legal_and_position_restored() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "4k3/8/8/3q4/8/8/8/4K3 w - - 0 1",
        ];
        for fen in fens {
            let mut pos = position(fen);
            let before = pos.clone();
            let side = pos.side_to_move();
            let mv = get_best_move(&mut pos, side, Depth::new(2)).unwrap();
            assert_eq!(pos, before);
            assert!(pos.legal_moves().contains(&mv.unwrap()));
        }
    }

    #[test]
    fn test_stats_are_recorded() {
        let mut pos = ChessPosition::default();
        let mut searcher = Searcher::new();
        searcher
            .search(&mut pos, Color::White, SearchLimits::depth(2))
            .unwrap();
        let stats = searcher.stats();
        assert_eq!(stats.depth, Depth::new(2));
        // Depth 1 visits the 20 replies, depth 2 at least those again plus
        // their children.
        assert!(stats.nodes > 40);
        assert!(!stats.score.is_infinite());
    }
}
