use boxchess::*;
use clap::Parser;

fn run_perft(board: &Board, depth: u8, divide: bool, parallel: bool, config: &EngineConfig) -> miette::Result<()> {
    #[cfg(feature = "parallel")]
    if parallel || config.perft.parallel {
        let result = perft::perft_parallel(board, depth, divide, config.perft.threads)?;
        perft::print_divide(&result, depth);
        return Ok(());
    }
    #[cfg(not(feature = "parallel"))]
    if parallel || config.perft.parallel {
        warn!("Built without the parallel feature, running serial perft");
    }

    if divide {
        perft::perft_divide(board, depth);
    } else {
        perft::run_perft_suite(board, depth);
    }
    Ok(())
}

fn main() -> miette::Result<()> {
    init();

    let span = span!(Level::DEBUG, "main");
    let _guard = span.enter();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => {
            let config = EngineConfig::load_from_file(&path)?;
            config.apply_logging()?;
            debug!(path = %path.display(), "Loaded config");
            config
        }
        None => EngineConfig::default(),
    };

    match cli.command {
        Some(Commands::Perft {
            fen,
            depth,
            divide,
            parallel,
        }) => {
            trace!("Running perft with fen: {fen:?}, depth: {depth}, divide: {divide}");
            let board = Board::from_fen(&fen)?;
            println!("{board}");
            run_perft(&board, depth, divide, parallel, &config)?;
        }
        Some(Commands::Moves { fen }) => {
            let board = Board::from_fen(&fen)?;
            let moves = board.generate_moves();
            for mv in &moves {
                println!("{mv} ({})", mv.kind);
            }
            println!("{} moves", moves.len());
        }
        Some(Commands::Print { fen }) => {
            let board = Board::from_fen(&fen)?;
            print!("{}", board.to_grid());
        }
        Some(Commands::Attacked { fen, square, by }) => {
            let board = Board::from_fen(&fen)?;
            let square = Square::from_str(&square)?;
            let by = Side::from_str(&by)?;
            let attacked = board.is_square_attacked(square, by);
            println!("{square} attacked by {by}: {attacked}");
        }
        Some(Commands::Explore { fen }) => {
            trace!("Starting explore mode with fen: {fen:?}");
            game_loop(&fen, &config)?;
        }
        None => {
            println!("Starting explore mode from the initial position");
            game_loop(START_FEN, &config)?;
        }
    }
    Ok(())
}
