use clap::Parser;
use color_eyre::eyre::Result;

use chess_rules::game::{ChessGame, DEFAULT_MOVES_LIMIT};
use chess_rules::setup::SetupFile;

#[derive(Parser, Debug)]
#[command(name = "chess")]
#[command(about = "Two-player chess in the terminal")]
struct Args {
    /// Path to the setup file describing the initial position
    #[arg(default_value = "data/standard.txt")]
    setup: String,

    /// Half-move limit before the game is declared a tie
    #[arg(long, default_value_t = DEFAULT_MOVES_LIMIT)]
    moves_limit: u32,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let setup = SetupFile::parse(&args.setup)?;
    let mut game = ChessGame::from_setup(&setup)?;
    game.set_moves_limit(args.moves_limit);
    game.run(std::io::stdin().lock())?;
    Ok(())
}
