//! Structural features of a board.
//!
//! All functions are pure reads through [`BoardView`]. They never panic, even
//! on boards with zero or one column or row.
//!
//! | feature | meaning |
//! |---|---|
//! | aggregate height | sum of the column heights |
//! | smoothness | sum of height differences between neighbouring columns |
//! | complete lines | rows in which every column is occupied |
//! | holes | empty cells whose upper neighbour is occupied |
//!
//! The extended evaluator adds:
//!
//! | feature | meaning |
//! |---|---|
//! | max height | tallest column |
//! | row / column transitions | filled-empty changes along rows and columns, walls counted as filled |
//! | cumulative wells | `1 + 2 + … + d` for every column `d` cells below its lower neighbour |
//! | hole profile | empty cells with any block above them, their depth and the rows they sit in |

use blockdrop_engine::BoardView;
use serde::Serialize;

use crate::weights::{ExtendedWeights, Weights};

/// Height of every column, in column order.
///
/// A column's height is `board.height() - y` for the topmost occupied cell
/// `y`, or `0` if the column is empty. A board without rows has no heights.
///
/// # Example
///
/// ```
/// use blockdrop_ai::board_feature::column_heights;
/// use blockdrop_engine::GameBoard;
///
/// let board: GameBoard = "...\n.#.\n##.".parse().unwrap();
/// assert_eq!(column_heights(&board), vec![1, 2, 0]);
/// ```
pub fn column_heights<B>(board: &B) -> Vec<usize>
where
    B: BoardView + ?Sized,
{
    let height = board.height();
    if height == 0 {
        return Vec::new();
    }
    (0..board.width())
        .map(|x| {
            (0..height)
                .find(|&y| board.is_occupied(x, y))
                .map_or(0, |y| height - y)
        })
        .collect()
}

#[must_use]
pub fn aggregate_height(heights: &[usize]) -> usize {
    heights.iter().sum()
}

/// Sum of `|h[i] - h[i + 1]|` over the first `width - 1` neighbouring pairs.
///
/// `width` is passed separately from `heights` because the move search bounds
/// the sum by the width of the board it started from.
#[must_use]
pub fn smoothness(heights: &[usize], width: usize) -> usize {
    heights
        .windows(2)
        .take(width.saturating_sub(1))
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum()
}

/// Number of rows in which every cell is occupied.
pub fn complete_lines<B>(board: &B) -> usize
where
    B: BoardView + ?Sized,
{
    let width = board.width();
    if width == 0 {
        return 0;
    }
    (0..board.height())
        .filter(|&y| (0..width).all(|x| board.is_occupied(x, y)))
        .count()
}

/// Number of empty cells sitting directly beneath an occupied cell.
///
/// Each such cell counts once, so a column with a gap under every block of a
/// stack contributes one hole per gap.
pub fn holes<B>(board: &B) -> usize
where
    B: BoardView + ?Sized,
{
    (0..board.width())
        .map(|x| {
            (1..board.height())
                .filter(|&y| !board.is_occupied(x, y) && board.is_occupied(x, y - 1))
                .count()
        })
        .sum()
}

#[must_use]
pub fn max_height(heights: &[usize]) -> usize {
    heights.iter().copied().max().unwrap_or(0)
}

/// Number of filled/empty changes along each row, walls on both sides counted as filled.
pub fn row_transitions<B>(board: &B) -> usize
where
    B: BoardView + ?Sized,
{
    (0..board.height())
        .map(|y| transitions((0..board.width()).map(|x| board.is_occupied(x, y))))
        .sum()
}

/// Number of filled/empty changes down each column, ceiling and floor counted as filled.
pub fn column_transitions<B>(board: &B) -> usize
where
    B: BoardView + ?Sized,
{
    (0..board.width())
        .map(|x| transitions((0..board.height()).map(|y| board.is_occupied(x, y))))
        .sum()
}

fn transitions(cells: impl Iterator<Item = bool>) -> usize {
    let (count, last) = cells.fold((0, true), |(count, prev), cell| {
        (count + usize::from(cell != prev), cell)
    });
    count + usize::from(!last)
}

/// Sum of `d * (d + 1) / 2` over columns lying `d` cells below their lower neighbour.
///
/// The board edge is not a neighbour, so an edge column is compared with its
/// single inner neighbour and a lone column is never a well.
#[must_use]
pub fn cumulative_wells(heights: &[usize]) -> usize {
    (0..heights.len())
        .map(|x| {
            let left = x.checked_sub(1).map(|i| heights[i]);
            let right = heights.get(x + 1).copied();
            let rim = match (left, right) {
                (Some(left), Some(right)) => left.min(right),
                (Some(side), None) | (None, Some(side)) => side,
                (None, None) => return 0,
            };
            let depth = rim.saturating_sub(heights[x]);
            depth * (depth + 1) / 2
        })
        .sum()
}

/// Empty cells with at least one block somewhere above them in their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HoleProfile {
    /// Number of such cells.
    pub holes: usize,
    /// Sum over those cells of the blocks above each.
    pub depth: usize,
    /// Number of distinct rows containing at least one of them.
    pub rows: usize,
}

pub fn hole_profile<B>(board: &B) -> HoleProfile
where
    B: BoardView + ?Sized,
{
    let mut profile = HoleProfile::default();
    let mut row_has_hole = vec![false; board.height()];
    for x in 0..board.width() {
        let mut blocks_above = 0;
        for (y, has_hole) in row_has_hole.iter_mut().enumerate() {
            if board.is_occupied(x, y) {
                blocks_above += 1;
            } else if blocks_above > 0 {
                profile.holes += 1;
                profile.depth += blocks_above;
                *has_hole = true;
            }
        }
    }
    profile.rows = row_has_hole.iter().filter(|&&has_hole| has_hole).count();
    profile
}

/// The four features of one board, as fed to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeatureVector {
    pub aggregate_height: usize,
    pub smoothness: usize,
    pub complete_lines: usize,
    pub holes: usize,
}

impl FeatureVector {
    pub fn from_board<B>(board: &B) -> Self
    where
        B: BoardView + ?Sized,
    {
        Self::measure(board, board.width())
    }

    /// Like [`Self::from_board`], but bounds smoothness by `smoothness_width`
    /// instead of the board's own width.
    pub fn measure<B>(board: &B, smoothness_width: usize) -> Self
    where
        B: BoardView + ?Sized,
    {
        let heights = column_heights(board);
        Self {
            aggregate_height: aggregate_height(&heights),
            smoothness: smoothness(&heights, smoothness_width),
            complete_lines: complete_lines(board),
            holes: holes(board),
        }
    }

    /// Weighted sum of the features. Higher is better.
    #[must_use]
    pub fn score(&self, weights: &Weights) -> f64 {
        weights.aggregate_height * as_f64(self.aggregate_height)
            + weights.smoothness * as_f64(self.smoothness)
            + weights.complete_lines * as_f64(self.complete_lines)
            + weights.holes * as_f64(self.holes)
    }
}

/// Features of the extended evaluator.
///
/// `landing_height` is the mean row of the falling piece where a straight
/// drop would put it, measured before the drop; larger is deeper.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExtendedFeatureVector {
    pub aggregate_height: usize,
    pub bumpiness: usize,
    pub complete_lines: usize,
    pub holes: usize,
    pub hole_depth: usize,
    pub rows_with_holes: usize,
    pub row_transitions: usize,
    pub column_transitions: usize,
    pub cumulative_wells: usize,
    pub max_height: usize,
    pub landing_height: f64,
}

impl ExtendedFeatureVector {
    pub fn measure<B>(board: &B, landing_height: f64) -> Self
    where
        B: BoardView + ?Sized,
    {
        let heights = column_heights(board);
        let holes = hole_profile(board);
        Self {
            aggregate_height: aggregate_height(&heights),
            bumpiness: smoothness(&heights, board.width()),
            complete_lines: complete_lines(board),
            holes: holes.holes,
            hole_depth: holes.depth,
            rows_with_holes: holes.rows,
            row_transitions: row_transitions(board),
            column_transitions: column_transitions(board),
            cumulative_wells: cumulative_wells(&heights),
            max_height: max_height(&heights),
            landing_height,
        }
    }

    #[must_use]
    pub fn score(&self, weights: &ExtendedWeights) -> f64 {
        weights.aggregate_height * as_f64(self.aggregate_height)
            + weights.bumpiness * as_f64(self.bumpiness)
            + weights.complete_lines * as_f64(self.complete_lines)
            + weights.holes * as_f64(self.holes)
            + weights.cumulative_wells * as_f64(self.cumulative_wells)
            + weights.row_transitions * as_f64(self.row_transitions)
            + weights.column_transitions * as_f64(self.column_transitions)
            + weights.hole_depth * as_f64(self.hole_depth)
            + weights.rows_with_holes * as_f64(self.rows_with_holes)
            + weights.max_height * as_f64(self.max_height)
            + weights.landing_height * self.landing_height
    }
}

#[expect(clippy::cast_precision_loss)]
pub(crate) fn as_f64(value: usize) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use blockdrop_engine::{GameBoard, PieceKind};

    use super::*;

    fn board(art: &str) -> GameBoard {
        art.parse().unwrap()
    }

    #[test]
    fn test_empty_board() {
        let board = GameBoard::new(10, 20);
        let features = FeatureVector::from_board(&board);
        assert_eq!(features, FeatureVector::default());
        assert_eq!(column_heights(&board), vec![0; 10]);
    }

    #[test]
    fn test_one_full_row() {
        let board = board(
            "
            ....
            ####
            ....
            ",
        );
        assert_eq!(complete_lines(&board), 1);
        assert_eq!(column_heights(&board), vec![2, 2, 2, 2]);
        // every cell of the bottom row is under a block
        assert_eq!(holes(&board), 4);
    }

    #[test]
    fn test_heights_and_smoothness() {
        let board = board(
            "
            .....
            .#...
            .#..#
            ##.##
            ",
        );
        let heights = column_heights(&board);
        assert_eq!(heights, vec![1, 3, 0, 1, 2]);
        assert_eq!(aggregate_height(&heights), 7);
        assert_eq!(smoothness(&heights, 5), 2 + 3 + 1 + 1);
        // bounded by a narrower width
        assert_eq!(smoothness(&heights, 3), 2 + 3);
        assert_eq!(holes(&board), 0);
        assert_eq!(complete_lines(&board), 0);
    }

    #[test]
    fn test_single_cell_hole() {
        let mut board = GameBoard::new(4, 6);
        board.fill_cell(2, 4, PieceKind::T);
        // the only empty cell strictly below the block is directly beneath it
        assert_eq!(holes(&board), 1);

        board.fill_cell(2, 2, PieceKind::T);
        assert_eq!(holes(&board), 2);
        assert_eq!(column_heights(&board), vec![0, 0, 4, 0]);
    }

    #[test]
    fn test_stacked_holes_each_count() {
        let board = board(
            "
            .#.
            ...
            .#.
            ...
            ",
        );
        assert_eq!(holes(&board), 2);
    }

    #[test]
    fn test_degenerate_boards() {
        for (width, height) in [(0, 0), (0, 5), (5, 0), (1, 1), (1, 3), (3, 1)] {
            let board = GameBoard::new(width, height);
            let features = FeatureVector::from_board(&board);
            assert_eq!(features, FeatureVector::default(), "{width}x{height}");
        }
        assert!(column_heights(&GameBoard::new(5, 0)).is_empty());
        assert_eq!(smoothness(&[], 0), 0);
        assert_eq!(smoothness(&[3], 1), 0);

        let mut tiny = GameBoard::new(1, 1);
        tiny.fill_cell(0, 0, PieceKind::O);
        let features = FeatureVector::from_board(&tiny);
        assert_eq!(features.complete_lines, 1);
        assert_eq!(features.aggregate_height, 1);
        assert_eq!(features.holes, 0);
    }

    #[test]
    fn test_clone_measures_the_same() {
        let original = board(
            "
            ......
            ..#...
            .#.#..
            ###.##
            ",
        );
        let copy = original.clone();
        assert_eq!(
            FeatureVector::from_board(&copy),
            FeatureVector::from_board(&original)
        );
    }

    #[test]
    fn test_extended_features() {
        let board = board(
            "
            ......
            .#....
            .#.#..
            #..#.#
            ",
        );
        let heights = column_heights(&board);
        assert_eq!(heights, vec![1, 3, 0, 2, 0, 1]);
        assert_eq!(max_height(&heights), 3);
        assert_eq!(row_transitions(&board), 2 + 4 + 6 + 4);
        assert_eq!(column_transitions(&board), 2 + 4 + 2 + 2 + 2 + 2);
        // columns 0, 2 and 4 sit 2, 2 and 1 below their lower neighbour
        assert_eq!(cumulative_wells(&heights), 3 + 3 + 1);
        assert_eq!(
            hole_profile(&board),
            HoleProfile {
                holes: 1,
                depth: 2,
                rows: 1,
            }
        );

        let features = ExtendedFeatureVector::measure(&board, 1.5);
        assert_eq!(features.aggregate_height, 7);
        assert_eq!(features.bumpiness, 2 + 3 + 2 + 2 + 1);
        assert_eq!(features.rows_with_holes, 1);
        assert!((features.landing_height - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hole_profile_counts_rows_once() {
        let board = board(
            "
            ##.
            #..
            ..#
            ",
        );
        assert_eq!(
            hole_profile(&board),
            HoleProfile {
                holes: 3,
                depth: 2 + 1 + 1,
                rows: 2,
            }
        );
    }

    #[test]
    fn test_extended_features_of_empty_board() {
        let board = GameBoard::new(10, 20);
        let features = ExtendedFeatureVector::measure(&board, 0.0);
        assert_eq!(features.row_transitions, 2 * 20);
        assert_eq!(features.column_transitions, 2 * 10);
        assert_eq!(features.cumulative_wells, 0);
        assert_eq!(features.max_height, 0);
        assert_eq!(features.holes, 0);

        for (width, height) in [(0, 0), (0, 3), (3, 0), (1, 1)] {
            let board = GameBoard::new(width, height);
            let features = ExtendedFeatureVector::measure(&board, 0.0);
            assert_eq!(features.cumulative_wells, 0, "{width}x{height}");
            assert_eq!(features.hole_depth, 0, "{width}x{height}");
        }
        assert_eq!(cumulative_wells(&[0]), 0);
        assert_eq!(cumulative_wells(&[0, 4]), 10);
    }

    #[test]
    fn test_extended_score_is_weighted_sum() {
        let features = ExtendedFeatureVector {
            aggregate_height: 2,
            row_transitions: 10,
            landing_height: 4.0,
            ..ExtendedFeatureVector::default()
        };
        let weights = ExtendedWeights::DEFAULT;
        let expected =
            2.0 * weights.aggregate_height + 10.0 * weights.row_transitions + 4.0 * weights.landing_height;
        assert!((features.score(&weights) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_weighted_sum() {
        let features = FeatureVector {
            aggregate_height: 10,
            smoothness: 4,
            complete_lines: 1,
            holes: 2,
        };
        let weights = Weights {
            aggregate_height: -1.0,
            smoothness: -0.5,
            complete_lines: 3.0,
            holes: -2.0,
        };
        assert!((features.score(&weights) - (-10.0 - 2.0 + 3.0 - 4.0)).abs() < 1e-12);
        assert!(FeatureVector::default().score(&Weights::DEFAULT).abs() < f64::EPSILON);
    }
}
