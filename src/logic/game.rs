use super::board::Board;
use super::errors::GameError;
use hrsw::Stopwatch;
use std::time::Duration;
use strum_macros::Display;

#[derive(Clone, Copy, Eq, PartialEq, Display, Debug)]
pub enum GameState {
    /// Board exists, mines not placed yet.
    Pending,
    /// Mines placed, no terminal condition reached.
    Active,
    Won,
    Lost,
}

/// What a reveal meant for the game as a whole.
#[derive(Clone, Copy, Eq, PartialEq, Display, Debug)]
pub enum RevealOutcome {
    Ongoing,
    MineHit,
    BoardCleared,
}

/// Game progression over a board: mines are placed on the first reveal
/// (excluding the clicked cell), terminal states refuse further moves, and
/// a stopwatch runs while the round is live.
pub struct Game {
    board: Board,
    state: GameState,
    stopwatch: Stopwatch,
}

impl Game {
    pub fn new(rows: usize, cols: usize, num_mines: usize) -> Result<Game, GameError> {
        let board = Board::new(rows, cols, num_mines)?;
        Ok(Game {
            board,
            state: GameState::Pending,
            stopwatch: Stopwatch::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    /// Reveals a cell. The first in-bounds reveal places the mines (never
    /// under the revealed cell) and computes adjacencies before the cell is
    /// opened; this fires even when the reveal itself then no-ops on a
    /// flagged cell.
    pub fn reveal(&mut self, x: usize, y: usize) -> Result<RevealOutcome, GameError> {
        match self.state {
            GameState::Won | GameState::Lost => return Err(GameError::Finished),
            GameState::Pending => {
                if !self.board.in_bounds(x as isize, y as isize) {
                    return Err(GameError::OutOfBounds);
                }
                self.board.generate_mines(x, y);
                self.board.calculate_adjacencies();
                self.state = GameState::Active;
                self.stopwatch.start();
            }
            GameState::Active => {}
        }

        if self.board.reveal(x, y)? {
            self.finish(GameState::Lost);
            Ok(RevealOutcome::MineHit)
        } else if self.board.is_complete() {
            self.finish(GameState::Won);
            Ok(RevealOutcome::BoardCleared)
        } else {
            Ok(RevealOutcome::Ongoing)
        }
    }

    /// Toggles a flag. Allowed while pending: flags never influence mine
    /// placement.
    pub fn toggle_flag(&mut self, x: usize, y: usize) -> Result<(), GameError> {
        match self.state {
            GameState::Won | GameState::Lost => Err(GameError::Finished),
            _ => self.board.toggle_flag(x, y),
        }
    }

    fn finish(&mut self, terminal: GameState) {
        self.stopwatch.stop();
        self.state = terminal;
    }

    #[cfg(test)]
    pub(crate) fn with_board(board: Board) -> Game {
        let mut game = Game {
            board,
            state: GameState::Active,
            stopwatch: Stopwatch::new(),
        };
        game.stopwatch.start();
        game
    }
}
