//! UCI command parser.

use super::SearchParams;
use crate::types::Depth;

/// Parsed UCI command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    /// "uci" - Initialize UCI mode
    Uci,
    /// "debug on/off"
    Debug(bool),
    /// "isready" - Synchronization
    IsReady,
    /// "setoption name X value Y"
    SetOption { name: String, value: Option<String> },
    /// "ucinewgame" - New game starting
    UciNewGame,
    /// "position startpos/fen [moves ...]"
    Position { fen: Option<String>, moves: Vec<String> },
    /// "go ..." - Start searching
    Go(SearchParams),
    /// "stop" - Searches are synchronous, nothing to interrupt
    Stop,
    /// "quit" - Exit the engine
    Quit,
    /// "d" - Debug: display board (non-standard but common)
    Display,
    /// Unknown command
    Unknown(String),
}

/// Parse one line of GUI input.
///
/// Only the first token selects the command; anything the engine does not
/// understand comes back as `Unknown` with the trimmed line.
pub fn parse_command(input: &str) -> UciCommand {
    let input = input.trim();
    let tokens: Vec<&str> = input.split_whitespace().collect();

    match tokens.as_slice() {
        ["uci", ..] => UciCommand::Uci,
        ["debug", rest @ ..] => UciCommand::Debug(rest.first() == Some(&"on")),
        ["isready", ..] => UciCommand::IsReady,
        ["setoption", rest @ ..] => parse_setoption(rest),
        ["ucinewgame", ..] => UciCommand::UciNewGame,
        ["position", rest @ ..] => parse_position(rest),
        ["go", rest @ ..] => parse_go(rest),
        ["stop", ..] => UciCommand::Stop,
        ["quit", ..] => UciCommand::Quit,
        ["d", ..] => UciCommand::Display,
        _ => UciCommand::Unknown(input.to_string()),
    }
}

/// Split `tokens` at the first `keyword`, dropping the keyword itself.
fn split_at_keyword<'a, 'b>(
    tokens: &'b [&'a str],
    keyword: &str,
) -> (&'b [&'a str], Option<&'b [&'a str]>) {
    match tokens.iter().position(|&t| t == keyword) {
        Some(i) => (&tokens[..i], Some(&tokens[i + 1..])),
        None => (tokens, None),
    }
}

/// `name <id...> [value <x...>]`; both parts may contain spaces.
fn parse_setoption(args: &[&str]) -> UciCommand {
    let (head, value) = split_at_keyword(args, "value");
    let name = match head {
        ["name", name @ ..] => name.join(" "),
        _ => head.join(" "),
    };

    UciCommand::SetOption {
        name,
        value: value.map(|v| v.join(" ")),
    }
}

/// `startpos | fen <fields...>` optionally followed by `moves <m...>`.
fn parse_position(args: &[&str]) -> UciCommand {
    let (setup, moves) = split_at_keyword(args, "moves");

    // At most six FEN fields; short FENs without clocks are allowed
    let fen = match setup {
        ["fen", fields @ ..] if !fields.is_empty() => {
            Some(fields[..fields.len().min(6)].join(" "))
        }
        _ => None,
    };

    UciCommand::Position {
        fen,
        moves: moves
            .unwrap_or_default()
            .iter()
            .map(|m| m.to_string())
            .collect(),
    }
}

/// Only `depth` is honoured; clock and node limits are skipped.
fn parse_go(args: &[&str]) -> UciCommand {
    let depth = args
        .windows(2)
        .find(|pair| pair[0] == "depth")
        .and_then(|pair| pair[1].parse::<i32>().ok())
        .map(Depth::new);

    UciCommand::Go(SearchParams { depth })
}
