//! Depth-limited alpha-beta chess engine.
//!
//! A static material and piece-square evaluator drives a minimax search with
//! alpha-beta pruning, wrapped in an iterative-deepening root loop. Board
//! representation and move generation come from the `chess` crate.
//!
//! ```no_run
//! use alphabeta_chess::{get_best_move, ChessPosition, Depth, Rules};
//!
//! let mut position = ChessPosition::default();
//! let side = position.side_to_move();
//! if let Ok(Some(mv)) = get_best_move(&mut position, side, Depth::new(3)) {
//!     println!("{}", mv);
//! }
//! ```

pub mod error;
pub mod eval;
pub mod game;
pub mod position;
pub mod search;
pub mod types;
pub mod uci;

pub use error::{EngineError, EngineResult};
pub use eval::{evaluate, GamePhase};
pub use position::{ChessPosition, GameStatus, Rules};
pub use search::{get_best_move, SearchLimits, SearchResult, Searcher};
pub use types::{Color, Depth, Move, Score};
