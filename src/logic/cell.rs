use strum_macros::Display;

/// One square of the board. Holds state flags only; neighbor relations are
/// derived from grid coordinates by the board.
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

/// Display classification of a cell. Styling (colors, characters) is chosen
/// by the renderer; the core only decides which glyph a cell shows.
#[derive(Clone, Copy, Eq, PartialEq, Display, Debug)]
pub enum Glyph {
    Flag,
    Mine,
    Hidden,
    Digit(u8),
    Blank,
}

impl Cell {
    /// Glyph selection, in priority order. A flag stays visible even when
    /// mines are being shown.
    pub fn glyph(&self, show_mines: bool) -> Glyph {
        if self.is_flagged {
            Glyph::Flag
        } else if !self.is_revealed && show_mines && self.is_mine {
            Glyph::Mine
        } else if !self.is_revealed {
            Glyph::Hidden
        } else if self.is_mine {
            Glyph::Mine
        } else if self.adjacent_mines > 0 {
            Glyph::Digit(self.adjacent_mines)
        } else {
            Glyph::Blank
        }
    }
}
