use crate::console::command::{parse_command, Command};
use crate::console::render::{write_board, GlyphStyle};
use crate::logic::game::{Game, GameState, RevealOutcome};
use std::io::{self, Write};

#[cfg(test)]
use mockall::automock;

const HOW_TO_PLAY: &str = "\
Welcome to Minesweeper!

How to play:
  - Reveal every cell that does NOT hide a mine.
  - A revealed digit counts the mines in the surrounding cells.

Commands:
  r x y  - reveal the cell at row x, column y (e.g., r 3 5)
  f x y  - toggle a flag on the cell at row x, column y (e.g., f 2 4)
";

/// Where player input comes from. A seam for tests; the binary wires in
/// stdin.
#[cfg_attr(test, automock)]
pub trait LineSource {
    /// The next input line, or `None` when the input is exhausted.
    fn next_line(&mut self) -> Option<String>;
}

pub struct StdinSource;

impl LineSource for StdinSource {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

/// The interactive loop: render, prompt, parse, dispatch, until the game
/// reaches a terminal state or the input runs dry. Returns the state the
/// game ended in.
pub fn run<W: Write>(
    game: &mut Game,
    input: &mut dyn LineSource,
    out: &mut W,
    style: &dyn GlyphStyle,
) -> io::Result<GameState> {
    writeln!(out, "{}", HOW_TO_PLAY)?;
    loop {
        if let GameState::Won | GameState::Lost = game.state() {
            break;
        }
        write_board(out, game.board(), false, style)?;
        write!(out, "Move (r x y to reveal, f x y to flag): ")?;
        out.flush()?;

        let line = match input.next_line() {
            Some(line) => line,
            None => break,
        };
        match parse_command(&line) {
            Command::Reveal { x, y } => {
                if !game.board().in_bounds(x, y) {
                    writeln!(out, "❌ Invalid coordinates!")?;
                    continue;
                }
                match game.reveal(x as usize, y as usize) {
                    Ok(RevealOutcome::MineHit) => {
                        write_board(out, game.board(), true, style)?;
                        writeln!(out, "💥 Boom! You stepped on a mine. Game over.")?;
                    }
                    Ok(RevealOutcome::BoardCleared) => {
                        write_board(out, game.board(), true, style)?;
                        writeln!(
                            out,
                            "🎉 Congratulations! You cleared the board in {:.1}s.",
                            game.elapsed().as_secs_f64()
                        )?;
                    }
                    Ok(RevealOutcome::Ongoing) => {}
                    Err(err) => writeln!(out, "{}", err)?,
                }
            }
            Command::Flag { x, y } => {
                if !game.board().in_bounds(x, y) {
                    writeln!(out, "❌ Invalid coordinates!")?;
                    continue;
                }
                if let Err(err) = game.toggle_flag(x as usize, y as usize) {
                    writeln!(out, "{}", err)?;
                }
            }
            Command::Invalid => {
                writeln!(out, "⚠️ Invalid command. Use `r x y` to reveal or `f x y` to flag.")?;
            }
        }
    }
    Ok(game.state())
}
