//! Search with the extended evaluator.
//!
//! Differs from [`move_search`](crate::move_search) in four ways:
//!
//! - shifts are counted from the centre column ([`centred_shifts`](crate::placement::centred_shifts));
//! - a burst never stops early, and inputs with no piece to act on are ignored;
//! - the board is scored with [`ExtendedFeatureVector`], whose landing height
//!   comes from a ghost drop of the steered piece;
//! - a candidate must score strictly better to win, except that a tie in the
//!   centre column replaces the incumbent.

use blockdrop_engine::{Board, BoardView, Cell, Direction, NoActivePieceError, Rotation};

use crate::{
    board_feature::{ExtendedFeatureVector, as_f64},
    move_search::SearchResult,
    placement::{self, Placement},
    weights::ExtendedWeights,
};

/// Mean row of the falling piece after a straight drop, or `None` if nothing is falling.
///
/// The board is not modified.
pub fn landing_height<B>(board: &B) -> Option<f64>
where
    B: Board,
{
    let mut cells = board.falling_cells()?;
    if cells.is_empty() {
        return None;
    }
    while !rests(board, &cells) {
        for (_, y) in &mut cells {
            *y += 1;
        }
    }
    let rows: i32 = cells.iter().map(|&(_, y)| y).sum();
    Some(f64::from(rows) / as_f64(cells.len()))
}

fn rests<B>(board: &B, cells: &[Cell]) -> bool
where
    B: BoardView,
{
    let floor = i32::try_from(board.height()).unwrap_or(i32::MAX);
    cells.iter().any(|&(x, y)| {
        y + 1 >= floor
            || matches!(
                (usize::try_from(x), usize::try_from(y + 1)),
                (Ok(x), Ok(y)) if board.is_occupied(x, y)
            )
    })
}

/// Rotates and shifts toward `placement`, ignoring landings and missing pieces.
fn steer<B>(board: &mut B, placement: Placement)
where
    B: Board,
{
    let width = board.width();
    for _ in 0..placement.rotation {
        if board.rotate_piece(Rotation::Clockwise).is_err() {
            tracing::trace!(?placement, "no piece to rotate");
        }
    }
    for direction in placement::centred_shifts(width, placement.position) {
        if board.move_piece(direction).is_err() {
            tracing::trace!(?placement, "no piece to shift");
        }
    }
}

/// Scores every placement with the extended evaluator and returns the best one.
///
/// # Errors
///
/// Returns [`NoActivePieceError`] if the board has no falling piece.
///
/// # Example
///
/// ```
/// use blockdrop_ai::{extended_search::find_best_move_extended, weights::ExtendedWeights};
/// use blockdrop_engine::{GameBoard, PieceKind};
///
/// let mut board = GameBoard::new(10, 20);
/// board.set_next_piece(PieceKind::O);
/// board.place_next_piece();
///
/// let result = find_best_move_extended(&board, &ExtendedWeights::DEFAULT).unwrap();
/// assert!(result.placement.position < 10);
/// ```
pub fn find_best_move_extended<B>(
    board: &B,
    weights: &ExtendedWeights,
) -> Result<SearchResult, NoActivePieceError>
where
    B: Board,
{
    if board.falling_cells().is_none() {
        return Err(NoActivePieceError);
    }

    let width = board.width();
    let centre = width / 2;
    let mut best = SearchResult {
        placement: Placement::new(0, 0),
        score: f64::NEG_INFINITY,
    };

    for position in 0..width {
        for rotation in 0..placement::ROTATIONS {
            let placement = Placement::new(position, rotation);
            let mut sandbox = board.clone();
            steer(&mut sandbox, placement);

            let landing = landing_height(&sandbox).unwrap_or(0.0);
            if sandbox.move_piece(Direction::Drop).is_err() {
                tracing::trace!(?placement, "nothing left to drop");
            }

            let features = ExtendedFeatureVector::measure(&sandbox, landing);
            let score = features.score(weights);
            tracing::trace!(position, rotation, score, ?features, "scored placement");

            #[expect(clippy::float_cmp)]
            let centre_tie = score == best.score && position == centre;
            if score > best.score || centre_tie {
                best = SearchResult { placement, score };
            }
        }
    }

    tracing::debug!(
        position = best.placement.position,
        rotation = best.placement.rotation,
        score = best.score,
        "best extended placement"
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use blockdrop_engine::{GameBoard, PieceKind};

    use super::*;

    /// A board whose piece never moves and which has nothing to drop.
    #[derive(Debug, Clone)]
    struct StuckBoard;

    impl BoardView for StuckBoard {
        fn width(&self) -> usize {
            7
        }

        fn height(&self) -> usize {
            5
        }

        fn is_occupied(&self, _x: usize, y: usize) -> bool {
            y == 4
        }
    }

    impl Board for StuckBoard {
        fn move_piece(&mut self, direction: Direction) -> Result<bool, NoActivePieceError> {
            match direction {
                Direction::Drop => Err(NoActivePieceError),
                _ => Ok(false),
            }
        }

        fn rotate_piece(&mut self, _rotation: Rotation) -> Result<bool, NoActivePieceError> {
            Ok(false)
        }

        fn falling_cells(&self) -> Option<Vec<Cell>> {
            Some(vec![(0, 0)])
        }
    }

    #[test]
    fn test_ties_go_to_centre_column() {
        let result = find_best_move_extended(&StuckBoard, &ExtendedWeights::DEFAULT).unwrap();
        assert_eq!(result.placement, Placement::new(3, 3));
    }

    #[test]
    fn test_landing_height() {
        let mut board = GameBoard::new(10, 20);
        assert_eq!(landing_height(&board), None);

        board.set_next_piece(PieceKind::I);
        board.place_next_piece();
        assert!(landing_height(&board).is_some_and(|h| (h - 17.5).abs() < f64::EPSILON));
        // the ghost drop leaves the piece where it was
        assert!(board.falling_piece().is_some());

        // a single-cell piece on the stub rests on row 3
        assert!(landing_height(&StuckBoard).is_some_and(|h| (h - 3.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_needs_a_falling_piece() {
        assert_eq!(
            find_best_move_extended(&GameBoard::new(10, 20), &ExtendedWeights::DEFAULT),
            Err(NoActivePieceError)
        );
    }

    #[test]
    fn test_deterministic_and_board_untouched() {
        let mut board = GameBoard::new(10, 20);
        board.set_next_piece(PieceKind::S);
        board.place_next_piece();
        let before = board.clone();
        let first = find_best_move_extended(&board, &ExtendedWeights::DEFAULT).unwrap();
        let second = find_best_move_extended(&board, &ExtendedWeights::DEFAULT).unwrap();
        assert_eq!(first, second);
        assert_eq!(board, before);
    }
}
