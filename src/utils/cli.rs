use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::START_FEN;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("APP_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// TOML config file with time control, perft and log settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run perft on given FEN and depth, or use default fen
    Perft {
        /// FEN string for starting position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
        /// set search depth
        #[arg(short, long, default_value = "3")]
        depth: u8,
        /// print the node count below every root move
        #[arg(long, default_value = "false")]
        divide: bool,
        /// split root moves over worker threads
        #[arg(short, long, default_value = "false")]
        parallel: bool,
    },

    /// List the pseudo-legal moves of a position
    Moves {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },

    /// Print the board grid of a position
    Print {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },

    /// Check whether a square is attacked by a side
    Attacked {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
        /// Square in coordinate notation, e.g. e4
        #[arg(short, long)]
        square: String,
        /// Attacking side: white or black
        #[arg(short, long)]
        by: String,
    },

    /// Walk through positions interactively
    Explore {
        /// FEN string for starting position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "game_cmd", no_binary_name = true)]
pub struct GameCommand {
    #[command(subcommand)]
    pub cmd: GameSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GameSubcommand {
    /// Make a move on the board
    #[clap(visible_alias = "m")]
    Move { from: String, to: String },

    /// Print the current board state
    #[clap(visible_alias = "p")]
    Print,

    /// List the moves available to the side to move
    #[clap(visible_alias = "l")]
    Moves,

    /// Undo the last move
    #[clap(visible_alias = "u")]
    Undo,

    /// Show the current fen of the board, or set a new one
    #[clap(visible_alias = "f")]
    Fen { set: Option<String> },

    /// Run a perft test with given depth [default: 3]
    #[clap(visible_alias = "pe")]
    Perft {
        depth: Option<u8>,
        #[arg(short, default_value = "false")]
        divide: bool,
    },

    /// Show the time control and the budget for the next move
    #[clap(visible_alias = "t")]
    Time,

    /// Clear screen
    #[clap(visible_alias = "c")]
    Clear,

    /// Restart game with same fen
    #[clap(visible_alias = "r")]
    Restart,

    /// Quit game
    #[clap(visible_alias = "q")]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_command_parsing() {
        let cmd = GameCommand::try_parse_from(["m", "e2", "e4"]).unwrap();
        assert!(matches!(cmd.cmd, GameSubcommand::Move { ref from, ref to } if from == "e2" && to == "e4"));

        let cmd = GameCommand::try_parse_from(["perft", "2", "-d"]).unwrap();
        assert!(matches!(cmd.cmd, GameSubcommand::Perft { depth: Some(2), divide: true }));

        assert!(GameCommand::try_parse_from(["fly"]).is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["boxchess", "perft", "-d", "2", "--divide"]).unwrap();
        match cli.command {
            Some(Commands::Perft { fen, depth, divide, parallel }) => {
                assert_eq!(fen, START_FEN);
                assert_eq!(depth, 2);
                assert!(divide);
                assert!(!parallel);
            }
            _ => panic!("expected perft command"),
        }
    }
}
