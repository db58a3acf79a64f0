use std::io;

use clap::Parser;
use minesweeper::{run, ColorStyle, Game, GameState, GlyphStyle, PlainStyle, StdinSource};

#[derive(Parser)]
#[command(author, version, about = "Classic minesweeper in the terminal", long_about = None)]
struct Cli {
    #[arg(long, default_value_t = 9, help = "Number of board rows")]
    rows: usize,
    #[arg(long, default_value_t = 9, help = "Number of board columns")]
    cols: usize,
    #[arg(long, default_value_t = 10, help = "Number of hidden mines")]
    mines: usize,
    #[arg(long, help = "Render the board without ANSI colors")]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut game = Game::new(cli.rows, cli.cols, cli.mines)?;

    let style: &dyn GlyphStyle = if cli.plain { &PlainStyle } else { &ColorStyle };
    let stdout = io::stdout();
    let state = run(&mut game, &mut StdinSource, &mut stdout.lock(), style)?;

    if let GameState::Pending | GameState::Active = state {
        println!("\nGoodbye!");
    }
    Ok(())
}
