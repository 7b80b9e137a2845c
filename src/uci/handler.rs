//! UCI command handler and main loop.

use std::io::{self, BufRead, Write};

use log::{debug, warn};

use super::parser::{parse_command, UciCommand};
use super::{format_move, play_move, SearchParams, ENGINE_AUTHOR, ENGINE_NAME};
use crate::eval;
use crate::position::{ChessPosition, Rules};
use crate::search::{SearchLimits, Searcher, DEFAULT_DEPTH};
use crate::types::{Depth, Move, Score};

/// Deepest value accepted for the Depth option
const MAX_OPTION_DEPTH: i32 = 12;

/// UCI protocol handler
pub struct UciHandler<W: Write = io::Stdout> {
    /// Current game, including moves from the last "position" command
    position: ChessPosition,
    /// Search engine
    searcher: Searcher,
    /// Depth used by "go" without an explicit depth
    default_depth: Depth,
    /// Debug mode enabled
    debug: bool,
    /// Should the engine quit
    quit: bool,
    out: W,
}

impl Default for UciHandler<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl UciHandler<io::Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl<W: Write> UciHandler<W> {
    /// Handler writing protocol output to `out`.
    pub fn with_output(out: W) -> Self {
        Self {
            position: ChessPosition::default(),
            searcher: Searcher::new(),
            default_depth: DEFAULT_DEPTH,
            debug: false,
            quit: false,
            out,
        }
    }

    /// Run the UCI main loop until "quit" or end of input
    pub fn run<R: BufRead>(&mut self, input: R) {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if self.debug {
                        debug!("< {}", line);
                    }
                    self.handle_input(&line);
                    if self.quit {
                        break;
                    }
                }
                Err(e) => {
                    warn!("stopping on input error: {}", e);
                    break;
                }
            }
        }
    }

    /// Handle a single UCI command
    pub fn handle_input(&mut self, input: &str) {
        let cmd = parse_command(input);
        self.handle_command(cmd);
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Current position
    pub fn position(&self) -> &ChessPosition {
        &self.position
    }

    /// Consume the handler and return its output sink
    pub fn into_output(self) -> W {
        self.out
    }

    fn handle_command(&mut self, cmd: UciCommand) {
        match cmd {
            UciCommand::Uci => self.cmd_uci(),
            UciCommand::Debug(on) => self.debug = on,
            UciCommand::IsReady => self.send("readyok"),
            UciCommand::SetOption { name, value } => self.cmd_setoption(&name, value.as_deref()),
            UciCommand::UciNewGame => self.cmd_ucinewgame(),
            UciCommand::Position { fen, moves } => self.cmd_position(fen.as_deref(), &moves),
            UciCommand::Go(params) => self.cmd_go(params),
            UciCommand::Stop => debug!("stop: no search running"),
            UciCommand::Quit => self.quit = true,
            UciCommand::Display => self.cmd_display(),
            UciCommand::Unknown(s) => {
                if !s.is_empty() {
                    warn!("unknown command: {}", s);
                }
            }
        }
    }

    /// Send output to GUI
    fn send(&mut self, msg: &str) {
        if let Err(e) = writeln!(self.out, "{}", msg).and_then(|_| self.out.flush()) {
            warn!("failed to write to GUI: {}", e);
        }
    }

    // === UCI Commands ===

    fn cmd_uci(&mut self) {
        self.send(&format!("id name {}", ENGINE_NAME));
        self.send(&format!("id author {}", ENGINE_AUTHOR));
        self.send(&format!(
            "option name Depth type spin default {} min 1 max {}",
            DEFAULT_DEPTH, MAX_OPTION_DEPTH
        ));
        self.send("uciok");
    }

    fn cmd_setoption(&mut self, name: &str, value: Option<&str>) {
        match name.to_lowercase().as_str() {
            "depth" => match value.and_then(|v| v.trim().parse::<i32>().ok()) {
                Some(d) if (1..=MAX_OPTION_DEPTH).contains(&d) => {
                    self.default_depth = Depth::new(d);
                    debug!("default depth set to {}", d);
                }
                _ => warn!("ignoring Depth value {:?}", value),
            },
            _ => warn!("unknown option: {}", name),
        }
    }

    fn cmd_ucinewgame(&mut self) {
        self.position = ChessPosition::default();
        self.searcher = Searcher::new();
    }

    fn cmd_position(&mut self, fen: Option<&str>, moves: &[String]) {
        self.position = match fen {
            Some(f) => match ChessPosition::from_fen(f) {
                Ok(pos) => pos,
                Err(e) => {
                    warn!("{}; using start position", e);
                    ChessPosition::default()
                }
            },
            None => ChessPosition::default(),
        };

        for move_str in moves {
            if let Err(e) = play_move(&mut self.position, move_str) {
                warn!("{}", e);
                break;
            }
        }
    }

    fn cmd_go(&mut self, params: SearchParams) {
        let limits = SearchLimits::from_params(&params, self.default_depth);
        let side = self.position.side_to_move();

        let best = match self.searcher.search(&mut self.position, side, limits) {
            Ok(best) => best,
            Err(e) => {
                warn!("{}", e);
                self.send("bestmove 0000");
                return;
            }
        };

        let stats = self.searcher.stats().clone();
        let mut info = InfoBuilder::new()
            .depth(stats.depth.raw())
            .nodes(stats.nodes)
            .nps(stats.nps())
            .time(stats.time_ms);
        if let Some(m) = best {
            info = info.score(stats.score).pv(&[m]);
        }
        self.send(&info.build());

        match best {
            Some(m) => self.send(&format!("bestmove {}", format_move(m))),
            None => self.send("bestmove 0000"),
        }
    }

    fn cmd_display(&mut self) {
        let msg = format!(
            "{}\nFEN: {}\nSide to move: {:?}\nStatus: {}\nEval: {}",
            self.position.board(),
            self.position.fen(),
            self.position.side_to_move(),
            self.position.status(),
            eval::evaluate(&self.position)
        );
        self.send(&msg);
    }
}

/// Info message builder for search output
pub struct InfoBuilder {
    parts: Vec<String>,
}

impl InfoBuilder {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn depth(mut self, d: i32) -> Self {
        self.parts.push(format!("depth {}", d));
        self
    }

    pub fn score(mut self, s: Score) -> Self {
        self.parts.push(format!("score {}", s));
        self
    }

    pub fn nodes(mut self, n: u64) -> Self {
        self.parts.push(format!("nodes {}", n));
        self
    }

    pub fn nps(mut self, n: u64) -> Self {
        self.parts.push(format!("nps {}", n));
        self
    }

    pub fn time(mut self, ms: u64) -> Self {
        self.parts.push(format!("time {}", ms));
        self
    }

    pub fn pv(mut self, moves: &[Move]) -> Self {
        if !moves.is_empty() {
            let pv_str: Vec<String> = moves.iter().map(|m| format_move(*m)).collect();
            self.parts.push(format!("pv {}", pv_str.join(" ")));
        }
        self
    }

    pub fn build(self) -> String {
        format!("info {}", self.parts.join(" "))
    }
}

impl Default for InfoBuilder {
    fn default() -> Self {
        Self::new()
    }
}
