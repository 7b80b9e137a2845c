use std::env;
use std::io;
use std::process::ExitCode;

use log::error;
use thiserror::Error;

use alphabeta_chess::game::{ai_move, self_play};
use alphabeta_chess::search::DEFAULT_DEPTH;
use alphabeta_chess::uci::{format_move, UciHandler};
use alphabeta_chess::{ChessPosition, Depth, EngineError};

const USAGE: &str = "usage: alphabeta-chess [uci | selfplay [depth] [max-plies] | bestmove <depth> <fen>]";

/// Plies played by `selfplay` when no cap is given
const DEFAULT_MAX_PLIES: usize = 200;

#[derive(Debug, Error)]
enum CliError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("bad {what} argument {arg:?}")]
    BadArgument { what: &'static str, arg: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None | Some("uci") => {
            let stdin = io::stdin();
            UciHandler::new().run(stdin.lock());
            Ok(())
        }
        Some("selfplay") => run_selfplay(&args[1..]),
        Some("bestmove") => run_bestmove(&args[1..]),
        Some(other) => Err(CliError::UnknownCommand(other.to_string())),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Engine(e)) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            ExitCode::from(2)
        }
    }
}

fn parse_depth(arg: Option<&String>) -> Result<Depth, CliError> {
    match arg {
        None => Ok(DEFAULT_DEPTH),
        Some(s) => s.parse::<i32>().map(Depth::new).map_err(|_| CliError::BadArgument {
            what: "depth",
            arg: s.clone(),
        }),
    }
}

fn parse_max_plies(arg: Option<&String>) -> Result<usize, CliError> {
    match arg {
        None => Ok(DEFAULT_MAX_PLIES),
        Some(s) => s.parse().map_err(|_| CliError::BadArgument {
            what: "max-plies",
            arg: s.clone(),
        }),
    }
}

fn run_selfplay(args: &[String]) -> Result<(), CliError> {
    let depth = parse_depth(args.first())?;
    let max_plies = parse_max_plies(args.get(1))?;

    let game = self_play(ChessPosition::default(), depth, max_plies)?;
    let moves: Vec<String> = game.moves.iter().map(|m| format_move(*m)).collect();
    println!("{}", moves.join(" "));
    println!("result: {}", game.status);
    println!("fen: {}", game.final_fen);
    Ok(())
}

fn run_bestmove(args: &[String]) -> Result<(), CliError> {
    let depth = parse_depth(args.first())?;
    let fen = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();

    let result = ai_move(&fen, depth)?;
    println!("move: {}", format_move(result.mv));
    println!("fen: {}", result.fen);
    println!("turn: {:?}", result.side_to_move);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depth() {
        assert_eq!(parse_depth(None).unwrap(), DEFAULT_DEPTH);
        assert_eq!(parse_depth(Some(&"4".to_string())).unwrap(), Depth::new(4));

        let err = parse_depth(Some(&"abc".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "bad depth argument \"abc\"");
    }

    #[test]
    fn test_zero_depth_is_an_engine_error() {
        // Parses fine; the search rejects it.
        let err = run_selfplay(&["0".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::InvalidDepth { depth: 0 })
        ));
    }

    #[test]
    fn test_bad_max_plies() {
        let err = run_selfplay(&["1".to_string(), "many".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::BadArgument { what: "max-plies", .. }));
    }
}
