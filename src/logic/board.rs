use super::cell::Cell;
use super::errors::GameError;
use indexmap::IndexSet;
use std::collections::HashSet;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Worklist for the reveal flood fill. Each coordinate is handed out at
/// most once.
struct Frontier {
    pending: IndexSet<(usize, usize)>,
    visited: HashSet<(usize, usize)>,
}

impl Frontier {
    fn new(x: usize, y: usize) -> Frontier {
        let mut pending = IndexSet::new();
        pending.insert((x, y));
        Frontier {
            pending,
            visited: HashSet::new(),
        }
    }

    fn next(&mut self) -> Option<(usize, usize)> {
        let coords = self.pending.pop()?;
        self.visited.insert(coords);
        Some(coords)
    }

    fn extend<I: IntoIterator<Item = (usize, usize)>>(&mut self, coords: I) {
        for pair in coords {
            if !self.visited.contains(&pair) {
                self.pending.insert(pair);
            }
        }
    }
}

/// The playing field: an owned dense grid of cells plus the mine budget.
/// Mines are placed lazily, on the first reveal, so the first-clicked cell
/// can be excluded from placement.
pub struct Board {
    rows: usize,
    cols: usize,
    num_mines: usize,
    grid: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(rows: usize, cols: usize, num_mines: usize) -> Result<Board, GameError> {
        let area = match rows.checked_mul(cols) {
            Some(area) if area > 0 => area,
            Some(_) => return Err(GameError::InvalidSize),
            None => return Err(GameError::InvalidSize),
        };
        if num_mines >= area {
            return Err(GameError::TooManyMines);
        }
        Ok(Board {
            rows,
            cols,
            num_mines,
            grid: vec![vec![Cell::default(); cols]; rows],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_mines(&self) -> usize {
        self.num_mines
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.grid[x][y]
    }

    /// Signed coordinates so callers can screen raw user input, negative
    /// values included, before indexing anything.
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && (x as usize) < self.rows && y >= 0 && (y as usize) < self.cols
    }

    fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if self.in_bounds(nx, ny) {
                Some((nx as usize, ny as usize))
            } else {
                None
            }
        })
    }

    /// Places exactly `num_mines` mines by rejection sampling, never on the
    /// excluded cell and never twice on the same cell. Call once, before the
    /// first reveal is processed. Terminates because construction guarantees
    /// `num_mines < rows * cols`.
    pub fn generate_mines(&mut self, exclude_x: usize, exclude_y: usize) {
        let mut placed = 0;
        while placed < self.num_mines {
            let x = rand::random::<usize>() % self.rows;
            let y = rand::random::<usize>() % self.cols;
            if (x == exclude_x && y == exclude_y) || self.grid[x][y].is_mine {
                continue;
            }
            self.grid[x][y].is_mine = true;
            placed += 1;
        }
    }

    /// Stamps every non-mine cell with its count of mine-bearing neighbors.
    /// Call once, right after `generate_mines`.
    pub fn calculate_adjacencies(&mut self) {
        for x in 0..self.rows {
            for y in 0..self.cols {
                if self.grid[x][y].is_mine {
                    continue;
                }
                let count = self
                    .neighbors(x, y)
                    .filter(|&(nx, ny)| self.grid[nx][ny].is_mine)
                    .count();
                self.grid[x][y].adjacent_mines = count as u8;
            }
        }
    }

    /// Reveals the cell at (x, y). Returns `Ok(true)` when a mine was
    /// revealed. Revealed and flagged cells are silent no-ops. Revealing a
    /// zero-adjacency cell opens its whole connected zero region plus the
    /// numbered border around it.
    pub fn reveal(&mut self, x: usize, y: usize) -> Result<bool, GameError> {
        if !self.in_bounds(x as isize, y as isize) {
            return Err(GameError::OutOfBounds);
        }
        if self.grid[x][y].is_revealed || self.grid[x][y].is_flagged {
            return Ok(false);
        }
        if self.grid[x][y].is_mine {
            self.grid[x][y].is_revealed = true;
            return Ok(true);
        }

        let mut frontier = Frontier::new(x, y);
        while let Some((r, c)) = frontier.next() {
            let cell = &mut self.grid[r][c];
            if cell.is_revealed || cell.is_flagged {
                continue;
            }
            cell.is_revealed = true;
            // Zero-adjacency cells never border a mine, so the fill can
            // fan out from them unconditionally.
            if cell.adjacent_mines == 0 {
                frontier.extend(self.neighbors(r, c));
            }
        }
        Ok(false)
    }

    /// Toggles the flag on an unrevealed cell. Revealed cells are left
    /// untouched.
    pub fn toggle_flag(&mut self, x: usize, y: usize) -> Result<(), GameError> {
        if !self.in_bounds(x as isize, y as isize) {
            return Err(GameError::OutOfBounds);
        }
        let cell = &mut self.grid[x][y];
        if !cell.is_revealed {
            cell.is_flagged = !cell.is_flagged;
        }
        Ok(())
    }

    /// True when every safe cell has been revealed. Mines need neither
    /// flags nor reveals for this to hold.
    pub fn is_complete(&self) -> bool {
        self.grid
            .iter()
            .flatten()
            .all(|cell| cell.is_revealed || cell.is_mine)
    }

    #[cfg(test)]
    pub(crate) fn with_mines_at(
        rows: usize,
        cols: usize,
        mines: &[(usize, usize)],
    ) -> Board {
        let mut board = Board::new(rows, cols, mines.len()).unwrap();
        for &(x, y) in mines {
            board.grid[x][y].is_mine = true;
        }
        board.calculate_adjacencies();
        board
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // 1 M 1 . .
    // 2 2 3 1 1
    // 1 M 2 M 1
    // 1 1 2 1 1
    fn fixture_4x5() -> Board {
        Board::with_mines_at(4, 5, &[(0, 1), (2, 1), (2, 3)])
    }

    fn revealed_count(board: &Board) -> usize {
        (0..board.rows())
            .flat_map(|x| (0..board.cols()).map(move |y| (x, y)))
            .filter(|&(x, y)| board.cell(x, y).is_revealed)
            .count()
    }

    #[test]
    fn construction_validates_mine_budget() {
        assert!(Board::new(3, 3, 8).is_ok());
        assert!(Board::new(3, 3, 0).is_ok());
        assert_eq!(Some(GameError::TooManyMines), Board::new(3, 3, 9).err());
        assert_eq!(Some(GameError::TooManyMines), Board::new(2, 2, 10).err());
    }

    #[test]
    fn construction_validates_dimensions() {
        assert_eq!(Some(GameError::InvalidSize), Board::new(0, 5, 0).err());
        assert_eq!(Some(GameError::InvalidSize), Board::new(5, 0, 0).err());
        assert_eq!(
            Some(GameError::InvalidSize),
            Board::new(usize::MAX, usize::MAX, 1).err()
        );
    }

    #[test]
    fn bounds_query_covers_all_edges() {
        let board = Board::new(4, 5, 0).unwrap();
        assert!(board.in_bounds(0, 0));
        assert!(board.in_bounds(3, 4));
        assert!(!board.in_bounds(-1, 0));
        assert!(!board.in_bounds(0, -1));
        assert!(!board.in_bounds(4, 0));
        assert!(!board.in_bounds(0, 5));
    }

    #[test]
    fn mines_avoid_the_excluded_cell() {
        for _ in 0..20 {
            let mut board = Board::new(5, 5, 10).unwrap();
            board.generate_mines(2, 3);
            assert!(!board.cell(2, 3).is_mine);
            let mine_count = (0..5)
                .flat_map(|x| (0..5).map(move |y| (x, y)))
                .filter(|&(x, y)| board.cell(x, y).is_mine)
                .count();
            assert_eq!(10, mine_count);
        }
    }

    #[test]
    fn adjacency_counts_match_the_neighborhood() {
        let board = fixture_4x5();
        let expected = [
            [1, 0, 1, 0, 0],
            [2, 2, 3, 1, 1],
            [1, 0, 2, 0, 1],
            [1, 1, 2, 1, 1],
        ];
        for x in 0..4 {
            for y in 0..5 {
                if board.cell(x, y).is_mine {
                    continue;
                }
                assert_eq!(
                    expected[x][y],
                    board.cell(x, y).adjacent_mines,
                    "wrong count at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn adjacency_matches_brute_force_on_random_boards() {
        for _ in 0..5 {
            let mut board = Board::new(6, 7, 12).unwrap();
            board.generate_mines(0, 0);
            board.calculate_adjacencies();
            for x in 0..6usize {
                for y in 0..7usize {
                    if board.cell(x, y).is_mine {
                        continue;
                    }
                    let mut count = 0;
                    for dx in -1isize..=1 {
                        for dy in -1isize..=1 {
                            if dx == 0 && dy == 0 {
                                continue;
                            }
                            let (nx, ny) = (x as isize + dx, y as isize + dy);
                            if board.in_bounds(nx, ny)
                                && board.cell(nx as usize, ny as usize).is_mine
                            {
                                count += 1;
                            }
                        }
                    }
                    assert_eq!(count, board.cell(x, y).adjacent_mines);
                }
            }
        }
    }

    #[test]
    fn revealing_a_mine_reports_the_hit() {
        let mut board = fixture_4x5();
        assert_eq!(Ok(true), board.reveal(0, 1));
        assert!(board.cell(0, 1).is_revealed);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = fixture_4x5();
        assert_eq!(Ok(false), board.reveal(1, 0));
        let opened = revealed_count(&board);
        assert_eq!(Ok(false), board.reveal(1, 0));
        assert_eq!(opened, revealed_count(&board));
    }

    #[test]
    fn revealing_a_flagged_cell_is_a_noop() {
        let mut board = fixture_4x5();
        board.toggle_flag(0, 1).unwrap();
        assert_eq!(Ok(false), board.reveal(0, 1));
        assert!(!board.cell(0, 1).is_revealed);
    }

    #[test]
    fn flood_fill_opens_the_zero_region_and_its_border() {
        let mut board = fixture_4x5();
        assert_eq!(Ok(false), board.reveal(0, 4));
        let expected: HashSet<(usize, usize)> =
            [(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4)]
                .iter()
                .cloned()
                .collect();
        for x in 0..4 {
            for y in 0..5 {
                assert_eq!(
                    expected.contains(&(x, y)),
                    board.cell(x, y).is_revealed,
                    "unexpected reveal state at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn flood_fill_never_opens_a_mine() {
        let mut board = Board::with_mines_at(6, 6, &[(5, 5)]);
        board.reveal(0, 0).unwrap();
        assert!(!board.cell(5, 5).is_revealed);
        assert!(board.cell(4, 4).is_revealed);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = fixture_4x5();
        board.toggle_flag(1, 4).unwrap();
        board.reveal(0, 4).unwrap();
        assert!(!board.cell(1, 4).is_revealed);
        assert!(board.cell(1, 3).is_revealed);
        assert!(board.cell(0, 2).is_revealed);
    }

    #[test]
    fn zero_mine_board_clears_in_one_reveal() {
        let mut board = Board::new(3, 3, 0).unwrap();
        board.generate_mines(1, 1);
        board.calculate_adjacencies();
        assert_eq!(Ok(false), board.reveal(1, 1));
        assert_eq!(9, revealed_count(&board));
        assert!(board.is_complete());
    }

    #[test]
    fn flag_toggle_is_its_own_inverse() {
        let mut board = fixture_4x5();
        board.toggle_flag(3, 3).unwrap();
        assert!(board.cell(3, 3).is_flagged);
        board.toggle_flag(3, 3).unwrap();
        assert!(!board.cell(3, 3).is_flagged);
    }

    #[test]
    fn flagging_a_revealed_cell_is_ignored() {
        let mut board = fixture_4x5();
        board.reveal(1, 0).unwrap();
        board.toggle_flag(1, 0).unwrap();
        assert!(!board.cell(1, 0).is_flagged);
    }

    #[test]
    fn completion_ignores_unflagged_mines() {
        let mut board = fixture_4x5();
        for x in 0..4 {
            for y in 0..5 {
                if !board.cell(x, y).is_mine {
                    board.reveal(x, y).unwrap();
                }
            }
        }
        assert!(board.is_complete());
        assert!(!board.cell(0, 1).is_revealed);
        assert!(!board.cell(0, 1).is_flagged);
    }

    #[test]
    fn completion_requires_every_safe_cell() {
        let mut board = fixture_4x5();
        board.reveal(1, 0).unwrap();
        assert!(!board.is_complete());
    }

    #[test]
    fn out_of_bounds_operations_are_rejected() {
        let mut board = fixture_4x5();
        assert_eq!(Err(GameError::OutOfBounds), board.reveal(4, 0));
        assert_eq!(Err(GameError::OutOfBounds), board.reveal(0, 5));
        assert_eq!(Err(GameError::OutOfBounds), board.toggle_flag(9, 9));
    }
}
