use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::movement::{Direction, Rotation};

/// Board coordinate of a single cell: `(x, y)` with `y` growing downward.
///
/// Signed so that a rotated piece may temporarily stick out of the board
/// before the board corrects or rejects it.
pub type Cell = (i32, i32);

/// A falling piece: four cells plus the centre it rotates around.
///
/// The centre may sit on a half cell (the I and O pieces), so it is stored
/// doubled to keep all arithmetic integral. Pieces are values; every
/// movement returns a new `Piece`.
///
/// # Example
///
/// ```
/// use blockdrop_engine::{Direction, Piece, PieceKind, Rotation};
///
/// let piece = Piece::new(PieceKind::T).spawned(10);
/// let moved = piece.shifted(Direction::Left, 1).rotated(Rotation::Clockwise);
/// assert_eq!(moved.cells().count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: ArrayVec<Cell, 4>,
    center2: Cell,
}

impl Piece {
    /// Creates a piece in its definition orientation at the top-left corner.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let (cells, center2) = kind.definition();
        Self {
            kind,
            cells: cells.into_iter().collect(),
            center2,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    #[must_use]
    pub fn min_x(&self) -> i32 {
        self.cells().map(|(x, _)| x).min().unwrap_or(0)
    }

    #[must_use]
    pub fn max_x(&self) -> i32 {
        self.cells().map(|(x, _)| x).max().unwrap_or(0)
    }

    #[must_use]
    pub fn min_y(&self) -> i32 {
        self.cells().map(|(_, y)| y).min().unwrap_or(0)
    }

    #[must_use]
    pub fn max_y(&self) -> i32 {
        self.cells().map(|(_, y)| y).max().unwrap_or(0)
    }

    /// Centres the piece horizontally on a board of the given width.
    ///
    /// The piece's middle column (rounded down) lands on column `width / 2`.
    #[must_use]
    pub fn spawned(&self, board_width: usize) -> Self {
        let left = self.min_x();
        let middle = left + (self.max_x() - left) / 2;
        let target = i32::try_from(board_width / 2).unwrap_or(i32::MAX);
        self.translated(target - middle, 0)
    }

    /// Moves the piece `count` cells in the given direction.
    ///
    /// [`Direction::Drop`] is resolved by the board, so it leaves the piece unchanged here.
    #[must_use]
    pub fn shifted(&self, direction: Direction, count: i32) -> Self {
        match direction {
            Direction::Left => self.translated(-count, 0),
            Direction::Right => self.translated(count, 0),
            Direction::Down => self.translated(0, count),
            Direction::Drop => self.clone(),
        }
    }

    /// Rotates the cells a quarter turn around the centre, truncating toward zero.
    ///
    /// The result is not validated; the board decides whether it is legal.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let (cx2, cy2) = self.center2;
        let cells = self
            .cells()
            .map(|(x, y)| match rotation {
                Rotation::Clockwise => ((cx2 + cy2 - 2 * y) / 2, (2 * x - cx2 + cy2) / 2),
                Rotation::Anticlockwise => ((2 * y - cy2 + cx2) / 2, (cx2 + cy2 - 2 * x) / 2),
            })
            .collect();
        Self {
            kind: self.kind,
            cells,
            center2: self.center2,
        }
    }

    fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells().map(|(x, y)| (x + dx, y + dy)).collect(),
            center2: (self.center2.0 + 2 * dx, self.center2.1 + 2 * dy),
        }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Spawn cells and doubled rotation centre.
    const fn definition(self) -> ([Cell; 4], Cell) {
        match self {
            PieceKind::I => ([(0, 0), (0, 1), (0, 2), (0, 3)], (1, 3)),
            PieceKind::J => ([(1, 0), (1, 1), (0, 2), (1, 2)], (2, 2)),
            PieceKind::L => ([(0, 0), (0, 1), (0, 2), (1, 2)], (0, 2)),
            PieceKind::O => ([(0, 0), (1, 0), (0, 1), (1, 1)], (1, 1)),
            PieceKind::S => ([(1, 0), (2, 0), (0, 1), (1, 1)], (2, 2)),
            PieceKind::T => ([(0, 0), (1, 0), (2, 0), (1, 1)], (2, 0)),
            PieceKind::Z => ([(0, 0), (1, 0), (1, 1), (2, 1)], (2, 2)),
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdrop_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdrop_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}
