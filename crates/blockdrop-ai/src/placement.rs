//! Placement candidates and how to reach them.
//!
//! A placement is reached from the spawn position by a fixed recipe:
//! `rotation` clockwise quarter turns, then the horizontal shifts the
//! position table assigns to `position`, then a drop.
//!
//! The extended evaluator steers differently: it shifts by the distance
//! between `position` and the centre column, see [`centred_shifts`].

use std::iter;

use blockdrop_engine::{Action, Board, Direction, NoActivePieceError, Rotation};
use serde::Serialize;

/// Number of rotation states tried per position.
pub const ROTATIONS: usize = 4;

/// Horizontal shifts from the spawn column, indexed by position.
///
/// Positions outside the table are not shifted at all. Positions 4 and 6 are
/// scored for every rotation; they are never skipped.
const SHIFT_TABLE: [(Direction, usize); 10] = [
    (Direction::Left, 5),
    (Direction::Left, 4),
    (Direction::Left, 3),
    (Direction::Left, 2),
    (Direction::Left, 1),
    (Direction::Right, 0),
    (Direction::Right, 1),
    (Direction::Right, 2),
    (Direction::Right, 3),
    (Direction::Right, 4),
];

/// The shifts that move a freshly spawned piece towards `position`.
///
/// # Example
///
/// ```
/// use blockdrop_ai::placement::shifts;
/// use blockdrop_engine::Direction;
///
/// assert_eq!(shifts(0).collect::<Vec<_>>(), vec![Direction::Left; 5]);
/// assert_eq!(shifts(7).collect::<Vec<_>>(), vec![Direction::Right; 2]);
/// assert_eq!(shifts(5).count(), 0);
/// assert_eq!(shifts(12).count(), 0);
/// ```
pub fn shifts(position: usize) -> impl Iterator<Item = Direction> {
    let (direction, count) = SHIFT_TABLE
        .get(position)
        .copied()
        .unwrap_or((Direction::Right, 0));
    iter::repeat_n(direction, count)
}

/// Shifts from the centre column `width / 2` to column `position`.
///
/// # Example
///
/// ```
/// use blockdrop_ai::placement::centred_shifts;
/// use blockdrop_engine::Direction;
///
/// assert_eq!(centred_shifts(10, 2).collect::<Vec<_>>(), vec![Direction::Left; 3]);
/// assert_eq!(centred_shifts(7, 6).collect::<Vec<_>>(), vec![Direction::Right; 3]);
/// ```
pub fn centred_shifts(width: usize, position: usize) -> impl Iterator<Item = Direction> {
    let centre = width / 2;
    let direction = if position < centre {
        Direction::Left
    } else {
        Direction::Right
    };
    iter::repeat_n(direction, position.abs_diff(centre))
}

/// A `(position, rotation)` candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Placement {
    pub position: usize,
    pub rotation: usize,
}

impl Placement {
    #[must_use]
    pub const fn new(position: usize, rotation: usize) -> Self {
        Self { position, rotation }
    }

    /// The full action sequence: rotations, shifts, then one drop.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        iter::repeat_n(Action::Rotate(Rotation::Clockwise), self.rotation)
            .chain(shifts(self.position).map(Action::Move))
            .chain(iter::once(Action::Move(Direction::Drop)))
            .collect()
    }

    /// Like [`Self::actions`], but steering with [`centred_shifts`].
    #[must_use]
    pub fn centred_actions(&self, width: usize) -> Vec<Action> {
        iter::repeat_n(Action::Rotate(Rotation::Clockwise), self.rotation)
            .chain(centred_shifts(width, self.position).map(Action::Move))
            .chain(iter::once(Action::Move(Direction::Drop)))
            .collect()
    }

    /// Plays this placement out on `board`.
    ///
    /// The rotation burst and the shift burst each stop as soon as a step
    /// lands the piece. A drop with nothing left to drop is ignored; a missing
    /// piece during either burst is an error.
    pub fn simulate<B>(&self, board: &mut B) -> Result<(), NoActivePieceError>
    where
        B: Board,
    {
        for _ in 0..self.rotation {
            if board.rotate_piece(Rotation::Clockwise)? {
                break;
            }
        }
        for direction in shifts(self.position) {
            if board.move_piece(direction)? {
                break;
            }
        }
        if let Err(NoActivePieceError) = board.move_piece(Direction::Drop) {
            tracing::trace!(placement = ?self, "nothing left to drop");
        }
        Ok(())
    }
}
