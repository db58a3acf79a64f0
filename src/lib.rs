mod console;
mod logic;

pub use console::command::{parse_command, Command};
pub use console::render::{write_board, ColorStyle, GlyphStyle, PlainStyle};
pub use console::session::{run, LineSource, StdinSource};
pub use logic::board::Board;
pub use logic::cell::{Cell, Glyph};
pub use logic::errors::GameError;
pub use logic::game::{Game, GameState, RevealOutcome};
