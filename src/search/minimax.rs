//! Minimax search with alpha-beta pruning.
//!
//! Plain two-branch minimax rather than negamax: scores stay in White's
//! frame throughout and the caller says which side of the tree it is on.
//! Moves are scanned in generator order, the position is mutated in place
//! and restored after every child.

use super::Searcher;
use crate::eval;
use crate::position::Rules;
use crate::types::{Depth, Score};

/// Result from a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub score: Score,
    /// `None` at leaves
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    #[inline]
    fn leaf(score: Score) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Depth-limited alpha-beta search.
///
/// Depth exhaustion and game end are the same leaf case: the position is
/// scored statically. Anywhere else the returned move is one of the legal
/// moves of `position`.
pub fn search<P: Rules>(
    searcher: &mut Searcher,
    position: &mut P,
    depth: Depth,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> SearchResult<P::Move> {
    searcher.inc_nodes();

    if depth.is_leaf() || position.is_terminal() {
        return SearchResult::leaf(eval::evaluate(&*position));
    }

    let mut best_move = None;

    if maximizing {
        let mut best_score = Score::neg_infinity();
        for mv in position.legal_moves() {
            position.apply(mv);
            let score = search(searcher, position, depth - 1, alpha, beta, false).score;
            position.unapply(mv);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        SearchResult {
            score: best_score,
            best_move,
        }
    } else {
        let mut best_score = Score::infinity();
        for mv in position.legal_moves() {
            position.apply(mv);
            let score = search(searcher, position, depth - 1, alpha, beta, true).score;
            position.unapply(mv);

            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        SearchResult {
            score: best_score,
            best_move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::ChessPosition;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Full-width minimax without cutoffs, for comparison.
    fn minimax(position: &mut ChessPosition, depth: i32, maximizing: bool, nodes: &mut u64) -> Score {
        *nodes += 1;
        if depth == 0 || position.is_terminal() {
            return eval::evaluate(&*position);
        }
        let mut best = if maximizing {
            Score::neg_infinity()
        } else {
            Score::infinity()
        };
        for mv in position.legal_moves() {
            position.apply(mv);
            let score = minimax(position, depth - 1, !maximizing, nodes);
            position.unapply(mv);
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        best
    }

    fn full_window(position: &mut ChessPosition, depth: i32, maximizing: bool) -> (SearchResult<crate::types::Move>, u64) {
        let mut searcher = Searcher::new();
        let result = search(
            &mut searcher,
            position,
            Depth::new(depth),
            Score::neg_infinity(),
            Score::infinity(),
            maximizing,
        );
        (result, searcher.stats().nodes)
    }

    fn random_positions(count: usize, seed: u64) -> Vec<ChessPosition> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut out = Vec::new();
        while out.len() < count {
            let mut pos = ChessPosition::default();
            let plies = rng.gen_range(4..30);
            for _ in 0..plies {
                let moves = pos.legal_moves();
                if moves.is_empty() || pos.is_terminal() {
                    break;
                }
                let mv = moves[rng.gen_range(0..moves.len())];
                pos.apply(mv);
            }
            if !pos.is_terminal() {
                out.push(ChessPosition::new(*pos.board()));
            }
        }
        out
    }

    #[test]
    fn test_pruning_matches_minimax_from_start() {
        for depth in 1..=3 {
            for maximizing in [true, false] {
                let mut pos = ChessPosition::default();
                let mut full_nodes = 0;
                let expected = minimax(&mut pos, depth, maximizing, &mut full_nodes);
                let (result, nodes) = full_window(&mut pos, depth, maximizing);
                assert_eq!(result.score, expected, "depth {} max {}", depth, maximizing);
                assert!(nodes <= full_nodes);
            }
        }
    }

    #[test]
    fn test_pruning_matches_minimax_on_random_positions() {
        for mut pos in random_positions(6, 0x5eed) {
            for depth in 1..=2 {
                for maximizing in [true, false] {
                    let mut full_nodes = 0;
                    let expected = minimax(&mut pos, depth, maximizing, &mut full_nodes);
                    let (result, _) = full_window(&mut pos, depth, maximizing);
                    assert_eq!(result.score, expected, "{} depth {}", pos.fen(), depth);
                }
            }
        }
    }

    #[test]
    fn test_cutoffs_skip_nodes() {
        let mut pos = ChessPosition::default();
        let mut full_nodes = 0;
        minimax(&mut pos, 3, true, &mut full_nodes);
        let (_, nodes) = full_window(&mut pos, 3, true);
        assert!(nodes < full_nodes, "{} vs {}", nodes, full_nodes);
    }

    #[test]
    fn test_leaf_has_no_move() {
        let mut pos = ChessPosition::default();
        let (result, nodes) = full_window(&mut pos, 0, true);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, eval::evaluate(&pos));
        assert_eq!(nodes, 1);
    }

    #[test]
    fn test_terminal_position_is_a_leaf() {
        let mut pos = ChessPosition::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        let (result, _) = full_window(&mut pos, 3, true);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, eval::evaluate(&pos));
    }

    #[test]
    fn test_interior_node_returns_legal_move() {
        for mut pos in random_positions(4, 42) {
            let legal = pos.legal_moves();
            for maximizing in [true, false] {
                let (result, _) = full_window(&mut pos, 2, maximizing);
                let mv = result.best_move.expect("interior node without a move");
                assert!(legal.contains(&mv));
            }
        }
    }

    #[test]
    fn test_search_leaves_position_untouched() {
        for mut pos in random_positions(3, 7) {
            let before = pos.clone();
            full_window(&mut pos, 3, true);
            assert_eq!(pos, before);
        }
    }

    #[test]
    fn test_narrow_window_cuts_off_early() {
        // A window that is already closed stops after the first child.
        let mut pos = ChessPosition::default();
        let first = pos.legal_moves()[0];
        let mut searcher = Searcher::new();
        let result = search(&mut searcher, &mut pos, Depth::new(1), Score::cp(0), Score::cp(0), true);
        assert_eq!(result.best_move, Some(first));
        assert_eq!(searcher.stats().nodes, 2);
    }
}
