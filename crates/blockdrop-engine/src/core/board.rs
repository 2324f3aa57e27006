use std::{fmt, str::FromStr};

use crate::{NoActivePieceError, ParseBoardError};

use super::{
    movement::{Direction, Rotation},
    piece::{Cell, Piece, PieceKind},
};

/// Points awarded by the number of lines removed in one landing.
///
/// More than four lines at once saturates at the last entry.
const LINE_CLEAR_SCORES: [u64; 5] = [0, 100, 400, 800, 1600];

/// Read-only view of a board's locked cells.
///
/// Coordinates are `(x, y)` with `y = 0` at the top row.
pub trait BoardView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Returns `true` if the locked cell at `(x, y)` is occupied.
    ///
    /// Coordinates outside the board are reported as empty.
    fn is_occupied(&self, x: usize, y: usize) -> bool;
}

/// Board whose falling piece can be driven by primitive moves.
///
/// `Clone` must produce a fully independent copy: simulations run on clones
/// and must never leak into the original.
pub trait Board: BoardView + Clone {
    /// Shifts or drops the falling piece.
    ///
    /// Returns `Ok(true)` once the piece has landed and can no longer be moved.
    fn move_piece(&mut self, direction: Direction) -> Result<bool, NoActivePieceError>;

    /// Rotates the falling piece.
    ///
    /// Returns `Ok(true)` once the piece has landed and can no longer be moved.
    fn rotate_piece(&mut self, rotation: Rotation) -> Result<bool, NoActivePieceError>;

    /// Cells of the falling piece, or `None` if nothing is falling.
    fn falling_cells(&self) -> Option<Vec<Cell>>;
}

/// The playing field: locked cells, the falling piece and the queued next piece.
///
/// Every successful shift or rotation is followed by one step of gravity, so a
/// piece can land in the middle of a move sequence. Landing locks the piece,
/// clears full lines and promotes the queued piece.
///
/// # Example
///
/// ```
/// use blockdrop_engine::{Board as _, Direction, GameBoard, PieceKind};
///
/// let mut board = GameBoard::new(10, 20);
/// board.set_next_piece(PieceKind::O);
/// board.place_next_piece();
///
/// let landed = board.move_piece(Direction::Drop).unwrap();
/// assert!(landed);
/// assert!(board.falling_piece().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    width: usize,
    height: usize,
    score: u64,
    cleared_lines: usize,
    cells: Vec<Option<PieceKind>>,
    falling: Option<Piece>,
    next: Option<Piece>,
}

impl GameBoard {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            score: 0,
            cleared_lines: 0,
            cells: vec![None; width * height],
            falling: None,
            next: None,
        }
    }

    /// Accumulated score: line clear bonuses plus one point per row of descent.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Total number of lines removed since the board was created.
    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// The game continues while the falling piece (if any) fits on the board.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.falling.as_ref().is_none_or(|piece| !self.collides(piece))
    }

    /// Queues the piece that will fall after the current one lands.
    pub fn set_next_piece(&mut self, kind: PieceKind) {
        self.next = Some(Piece::new(kind));
    }

    /// Promotes the queued piece to the falling piece, centred at the top.
    pub fn place_next_piece(&mut self) {
        self.falling = self.next.take().map(|piece| piece.spawned(self.width));
    }

    /// Locks a single cell, as if a piece of `kind` had landed there.
    ///
    /// Coordinates outside the board are ignored.
    pub fn fill_cell(&mut self, x: usize, y: usize, kind: PieceKind) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = Some(kind);
        }
    }

    /// Returns `true` if every cell of `row` is occupied.
    #[must_use]
    pub fn is_line_full(&self, row: usize) -> bool {
        row < self.height && (0..self.width).all(|x| self.is_occupied(x, row))
    }

    /// Applies one tick of gravity to the falling piece.
    ///
    /// Returns `Ok(true)` if the piece landed.
    pub fn skip(&mut self) -> Result<bool, NoActivePieceError> {
        let piece = self.falling.clone().ok_or(NoActivePieceError)?;
        Ok(self.apply_gravity(piece))
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn cell_index(&self, (x, y): Cell) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.index(x, y)
    }

    fn is_cell_occupied(&self, cell: Cell) -> bool {
        self.cell_index(cell)
            .is_some_and(|index| self.cells[index].is_some())
    }

    fn collides(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|cell| self.cell_index(cell).is_none() || self.is_cell_occupied(cell))
    }

    fn is_supported(&self, piece: &Piece) -> bool {
        let floor = i32::try_from(self.height).unwrap_or(i32::MAX);
        piece
            .cells()
            .any(|(x, y)| y + 1 >= floor || self.is_cell_occupied((x, y + 1)))
    }

    fn max_x(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX) - 1
    }

    fn max_y(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX) - 1
    }

    /// Shifts every row above `row` down by one, discarding `row`.
    fn remove_line(&mut self, row: usize) {
        let width = self.width;
        self.cells.copy_within(..row * width, width);
        self.cells[..width].fill(None);
    }

    /// Removes full lines from the bottom up and returns the points earned.
    ///
    /// The top row is never inspected.
    fn clear_full_lines(&mut self) -> u64 {
        let mut removed = 0;
        for row in (1..self.height).rev() {
            while self.is_line_full(row) {
                self.remove_line(row);
                removed += 1;
            }
        }
        self.cleared_lines += removed;
        LINE_CLEAR_SCORES[removed.min(LINE_CLEAR_SCORES.len() - 1)]
    }

    fn land(&mut self, piece: &Piece) {
        for cell in piece.cells() {
            if let Some(index) = self.cell_index(cell) {
                self.cells[index] = Some(piece.kind());
            }
        }
        self.falling = None;
        self.score += self.clear_full_lines();
        tracing::trace!(kind = ?piece.kind(), score = self.score, "piece landed");
        self.place_next_piece();
    }

    /// Lands `piece` if it rests on something, otherwise moves it down one row
    /// and lands it if that made it rest.
    fn apply_gravity(&mut self, piece: Piece) -> bool {
        if self.is_supported(&piece) {
            self.land(&piece);
            return true;
        }
        let piece = piece.shifted(Direction::Down, 1);
        self.score += 1;
        if self.is_supported(&piece) {
            self.land(&piece);
            return true;
        }
        self.falling = Some(piece);
        false
    }

    /// Pushes an out-of-range rotation back inside the walls and ceiling.
    ///
    /// Returns `None` if the piece cannot be made to fit.
    fn correct_rotation(&self, mut piece: Piece) -> Option<Piece> {
        if piece.min_x() < 0 {
            piece = piece.shifted(Direction::Right, -piece.min_x());
            if piece.min_x() < 0 {
                return None;
            }
        }
        if piece.max_x() > self.max_x() {
            piece = piece.shifted(Direction::Left, piece.max_x() - self.max_x());
            if piece.max_x() > self.max_x() {
                return None;
            }
        }
        if piece.min_y() < 0 {
            piece = piece.shifted(Direction::Down, -piece.min_y());
            if piece.min_y() < 0 {
                return None;
            }
        }
        if piece.max_y() > self.max_y() || self.collides(&piece) {
            return None;
        }
        Some(piece)
    }
}

impl BoardView for GameBoard {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .is_some_and(|index| self.cells[index].is_some())
    }
}

impl Board for GameBoard {
    fn move_piece(&mut self, direction: Direction) -> Result<bool, NoActivePieceError> {
        let mut piece = self.falling.clone().ok_or(NoActivePieceError)?;

        if direction == Direction::Drop {
            while !self.is_supported(&piece) {
                piece = piece.shifted(Direction::Down, 1);
                self.score += 1;
            }
            self.land(&piece);
            return Ok(true);
        }

        let moved = piece.shifted(direction, 1);
        if self.collides(&moved) {
            return Ok(false);
        }
        Ok(self.apply_gravity(moved))
    }

    fn rotate_piece(&mut self, rotation: Rotation) -> Result<bool, NoActivePieceError> {
        let piece = self.falling.clone().ok_or(NoActivePieceError)?;
        let Some(rotated) = self.correct_rotation(piece.rotated(rotation)) else {
            return Ok(false);
        };
        Ok(self.apply_gravity(rotated))
    }

    fn falling_cells(&self) -> Option<Vec<Cell>> {
        self.falling.as_ref().map(|piece| piece.cells().collect())
    }
}

impl fmt::Display for GameBoard {
    /// Renders one line per row: `.` empty, piece letter for locked cells,
    /// `@` for the falling piece.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let falling = self.falling.as_ref().is_some_and(|piece| {
                    piece
                        .cells()
                        .any(|cell| self.cell_index(cell) == self.index(x, y))
                });
                let ch = match self.cells[y * self.width + x] {
                    _ if falling => '@',
                    Some(kind) => kind.as_char(),
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for GameBoard {
    type Err = ParseBoardError;

    /// Parses rows of `.` (empty) and `#` or a piece letter (occupied).
    ///
    /// Blank lines and surrounding whitespace are ignored; the first row fixes the width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut board = GameBoard::new(width, rows.len());

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseBoardError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '.' => {}
                    // locked cells of unknown origin render as I-piece blocks
                    '#' => board.fill_cell(x, y, PieceKind::I),
                    _ => {
                        let kind =
                            PieceKind::from_char(ch).ok_or(ParseBoardError::InvalidCell { ch, x, y })?;
                        board.fill_cell(x, y, kind);
                    }
                }
            }
        }
        Ok(board)
    }
}
