use std::io::{BufRead, Write};

use clap::Parser;

use crate::prelude::*;

/// What the loop should do after a command ran.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Position being explored plus enough history to walk back through it.
#[derive(Debug)]
pub struct ExploreState {
    board: Board,
    start: Board,
    history: Vec<Board>,
    config: EngineConfig,
}

impl ExploreState {
    pub fn new(fen: &str, config: &EngineConfig) -> miette::Result<Self> {
        let board = Board::from_fen(fen).context("Parsing explore position")?;
        Ok(Self {
            board,
            start: board,
            history: Vec::new(),
            config: config.clone(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn reset(&mut self) {
        trace!("Resetting explore state");
        self.board = self.start;
        self.history.clear();
    }

    /// Plays `from`->`to` if the generator produces it and it does not leave
    /// the mover's king attacked.
    pub fn play(&mut self, from: &str, to: &str) -> miette::Result<Move> {
        let from = Square::from_str(from)?;
        let to = Square::from_str(to)?;

        let mv = self
            .board
            .generate_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .with_context(|| format!("{from}{to} is not a move in this position"))?;

        let mut next = self.board;
        next.apply_move(mv);
        miette::ensure!(
            !next.leaves_mover_in_check(),
            "{mv} leaves the {} king attacked",
            self.board.stm
        );

        self.history.push(self.board);
        self.board = next;
        debug!(%mv, "played move");
        Ok(mv)
    }

    pub fn undo(&mut self) -> miette::Result<()> {
        self.board = self.history.pop().context("Nothing to undo")?;
        Ok(())
    }

    /// Replaces the position and makes it the new restart point.
    pub fn set_fen(&mut self, fen: &str) -> miette::Result<()> {
        let board = Board::from_fen(fen)?;
        self.start = board;
        self.reset();
        Ok(())
    }

    pub fn execute(&mut self, cmd: GameSubcommand) -> miette::Result<Flow> {
        match cmd {
            GameSubcommand::Move { from, to } => {
                let mv = self.play(&from, &to)?;
                println!("played {mv}");
                println!("{}", self.board);
            }
            GameSubcommand::Print => println!("{}", self.board),
            GameSubcommand::Moves => {
                let moves = self.board.legal_moves();
                let list: Vec<String> = moves.iter().map(Move::uci).collect();
                println!("{} moves: {}", moves.len(), list.join(" "));
            }
            GameSubcommand::Undo => {
                self.undo()?;
                println!("{}", self.board);
            }
            GameSubcommand::Fen { set: Some(fen) } => {
                self.set_fen(&fen)?;
                println!("{}", self.board);
            }
            GameSubcommand::Fen { set: None } => println!("{}", self.board.to_fen()),
            GameSubcommand::Perft { depth, divide } => {
                let depth = depth.unwrap_or(3);
                if divide {
                    perft::perft_divide(&self.board, depth);
                } else {
                    let result = perft::perft(&self.board, depth, false);
                    println!(
                        "Depth {depth}: {} nodes in {} ms ({} nps)",
                        result.nodes,
                        result.duration.as_millis(),
                        result.nps
                    );
                }
            }
            GameSubcommand::Time => {
                let time = &self.config.time;
                println!("{time}");
                println!("next move budget: {} ms", time.move_budget().as_millis());
            }
            GameSubcommand::Clear => utils::clear_screen()?,
            GameSubcommand::Restart => {
                self.reset();
                println!("{}", self.board);
            }
            GameSubcommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Reads commands from stdin until `quit` or end of input. Bad input is
/// reported and the loop keeps going.
pub fn game_loop(fen: &str, config: &EngineConfig) -> miette::Result<()> {
    let mut state = ExploreState::new(fen, config)?;
    println!("{}", state.board());

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}> ", state.board().stm);
        std::io::stdout().flush().into_diagnostic()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.into_diagnostic().context("Reading command")?;

        let words = match shell_words::split(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                println!("Could not split input: {e}");
                continue;
            }
        };

        let cmd = match GameCommand::try_parse_from(words) {
            Ok(cmd) => cmd.cmd,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match state.execute(cmd) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!("Command failed: {e:?}");
                println!("{e}");
            }
        }
    }
    info!("Leaving explore mode");
    Ok(())
}
