use boxchess::board::Board;
use boxchess::perft::{perft_divide, run_perft_suite};
use std::env;

fn main() -> miette::Result<()> {
    boxchess::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: perft [depth] [fen]");
        println!("    depth: Depth to search, 0 runs the suite up to depth 4");
        println!("    fen: (optional) FEN string for position");
        return Ok(());
    }

    let depth = match args[1].parse::<u8>() {
        Ok(d) => d,
        Err(_) => {
            println!("Invalid depth: {}", args[1]);
            return Ok(());
        }
    };

    let board = match args.get(2) {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::new(),
    };

    if depth == 0 {
        run_perft_suite(&board, 4);
    } else {
        perft_divide(&board, depth);
    }
    Ok(())
}
