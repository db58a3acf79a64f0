use crate::logic::board::Board;
use crate::logic::cell::Glyph;
use std::io::{self, Write};

/// How classified glyphs become text. Keeps escape codes out of the core:
/// the board decides *what* a cell shows, a style decides *how*.
pub trait GlyphStyle {
    fn paint(&self, glyph: Glyph) -> String;
}

/// ANSI-colored glyphs: red flags and mines, green hidden cells.
pub struct ColorStyle;

/// Bare characters, for tests and terminals without color support.
pub struct PlainStyle;

fn red(text: &str) -> String {
    format!("\u{1b}[31m{}\u{1b}[0m", text)
}

fn green(text: &str) -> String {
    format!("\u{1b}[32m{}\u{1b}[0m", text)
}

impl GlyphStyle for ColorStyle {
    fn paint(&self, glyph: Glyph) -> String {
        match glyph {
            Glyph::Flag => red("F"),
            Glyph::Mine => red("X"),
            Glyph::Hidden => green("*"),
            Glyph::Digit(count) => count.to_string(),
            Glyph::Blank => "#".to_string(),
        }
    }
}

impl GlyphStyle for PlainStyle {
    fn paint(&self, glyph: Glyph) -> String {
        match glyph {
            Glyph::Flag => "F".to_string(),
            Glyph::Mine => "X".to_string(),
            Glyph::Hidden => "*".to_string(),
            Glyph::Digit(count) => count.to_string(),
            Glyph::Blank => "#".to_string(),
        }
    }
}

/// Writes the board as a grid with column and row labels, two columns per
/// cell. Read-only: rendering never changes board state.
pub fn write_board<W: Write>(
    out: &mut W,
    board: &Board,
    show_mines: bool,
    style: &dyn GlyphStyle,
) -> io::Result<()> {
    write!(out, "   ")?;
    for col in 0..board.cols() {
        write!(out, "{:>2}", col)?;
    }
    writeln!(out)?;

    for x in 0..board.rows() {
        write!(out, "{:>2} ", x)?;
        for y in 0..board.cols() {
            write!(out, " {}", style.paint(board.cell(x, y).glyph(show_mines)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
