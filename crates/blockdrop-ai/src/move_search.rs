//! Single-ply search for the best placement of the falling piece.
//!
//! # How It Works
//!
//! 1. **Enumerate** - every `(position, rotation)` with `position` in
//!    `0..width` (outer loop) and `rotation` in `0..4` (inner loop)
//! 2. **Simulate** - play the placement out on a fresh clone of the board
//! 3. **Score** - extract the [`FeatureVector`] of the clone and weight it
//! 4. **Select** - keep the candidate if it scores at least as well as the
//!    best so far
//!
//! Because ties replace the incumbent, the last enumerated of several equally
//! scored placements wins.

use blockdrop_engine::{Board, NoActivePieceError};
use serde::Serialize;

use crate::{
    board_feature::FeatureVector,
    placement::{self, Placement},
    weights::Weights,
};

/// Winner of a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchResult {
    pub placement: Placement,
    pub score: f64,
}

/// Scores every placement of the falling piece and returns the best one.
///
/// The board is only cloned, never modified. A board with no columns yields
/// placement `(0, 0)` with a score of negative infinity.
///
/// # Errors
///
/// Returns [`NoActivePieceError`] if a rotation or shift of a simulation finds
/// no falling piece. The final drop of a simulation may find none; that is not
/// an error.
///
/// # Example
///
/// ```
/// use blockdrop_ai::{move_search::find_best_move, weights::Weights};
/// use blockdrop_engine::{GameBoard, PieceKind};
///
/// let mut board = GameBoard::new(10, 20);
/// board.set_next_piece(PieceKind::I);
/// board.place_next_piece();
///
/// let result = find_best_move(&board, &Weights::DEFAULT).unwrap();
/// assert!(result.placement.position < 10);
/// assert!(result.placement.rotation < 4);
/// ```
pub fn find_best_move<B>(board: &B, weights: &Weights) -> Result<SearchResult, NoActivePieceError>
where
    B: Board,
{
    let width = board.width();
    let mut best = SearchResult {
        placement: Placement::new(0, 0),
        score: f64::NEG_INFINITY,
    };

    for position in 0..width {
        for rotation in 0..placement::ROTATIONS {
            let placement = Placement::new(position, rotation);
            let mut sandbox = board.clone();
            placement.simulate(&mut sandbox)?;

            // smoothness is bounded by the width of the board we started from
            let features = FeatureVector::measure(&sandbox, width);
            let score = features.score(weights);
            tracing::trace!(position, rotation, score, ?features, "scored placement");

            if score >= best.score {
                best = SearchResult { placement, score };
            }
        }
    }

    tracing::debug!(
        position = best.placement.position,
        rotation = best.placement.rotation,
        score = best.score,
        "best placement"
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use blockdrop_engine::{BoardView, Cell, Direction, GameBoard, PieceKind, Rotation};

    use super::*;

    /// A board whose piece never moves and which has nothing to drop.
    #[derive(Debug, Clone)]
    struct FrozenBoard {
        width: usize,
        height: usize,
    }

    impl BoardView for FrozenBoard {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn is_occupied(&self, _x: usize, y: usize) -> bool {
            y + 1 == self.height
        }
    }

    impl Board for FrozenBoard {
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
            None
        }
    }

    fn board_with(kind: PieceKind) -> GameBoard {
        let mut board = GameBoard::new(10, 20);
        board.set_next_piece(kind);
        board.place_next_piece();
        board
    }

    #[test]
    fn test_ties_go_to_last_candidate() {
        let board = FrozenBoard {
            width: 7,
            height: 5,
        };
        let result = find_best_move(&board, &Weights::DEFAULT).unwrap();
        assert_eq!(result.placement, Placement::new(6, 3));
        // one complete line, every column one high
        let expected = Weights::DEFAULT.aggregate_height * 7.0 + Weights::DEFAULT.complete_lines;
        assert!((result.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        for kind in PieceKind::ALL {
            let board = board_with(kind);
            let first = find_best_move(&board, &Weights::DEFAULT).unwrap();
            let second = find_best_move(&board, &Weights::DEFAULT).unwrap();
            assert_eq!(first, second, "{kind:?}");
        }
    }

    #[test]
    fn test_board_is_not_modified() {
        let board = board_with(PieceKind::T);
        let before = board.clone();
        find_best_move(&board, &Weights::DEFAULT).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_missing_piece_is_an_error() {
        let board = GameBoard::new(10, 20);
        assert_eq!(
            find_best_move(&board, &Weights::DEFAULT),
            Err(NoActivePieceError)
        );
    }

    #[test]
    fn test_zero_width_board() {
        let board = GameBoard::new(0, 20);
        let result = find_best_move(&board, &Weights::DEFAULT).unwrap();
        assert_eq!(result.placement, Placement::new(0, 0));
        assert!(result.score.is_infinite() && result.score < 0.0);
    }

    #[test]
    fn test_prefers_flat_placement() {
        // a vertical I in the gap clears three lines and leaves no holes
        let mut board: GameBoard = "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            .........#
            ##.#######
            ##.#######
            ##.#######
        "
        .parse()
        .unwrap();
        board.set_next_piece(PieceKind::I);
        board.place_next_piece();
        let result = find_best_move(&board, &Weights::DEFAULT).unwrap();
        assert_eq!(result.placement.position, 2);
        assert_eq!(result.placement.rotation % 2, 0);
    }
}
