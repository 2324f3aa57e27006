use crate::{
    NoActivePieceError,
    core::{
        board::{Board as _, GameBoard},
        movement::Action,
    },
};

use super::piece_generator::{PieceGenerator, PieceSeed};

/// A board fed by a random piece source.
///
/// The generator plays the adversary: whenever the board runs out of a
/// falling or a queued piece, [`Self::ensure_spawn`] draws a new one.
#[derive(Debug, Clone)]
pub struct GameField {
    board: GameBoard,
    generator: PieceGenerator,
}

impl GameField {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_parts(GameBoard::new(width, height), PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(width: usize, height: usize, seed: PieceSeed) -> Self {
        Self::from_parts(GameBoard::new(width, height), PieceGenerator::with_seed(seed))
    }

    /// Starts from an existing board, e.g. one parsed from text.
    #[must_use]
    pub fn from_parts(board: GameBoard, generator: PieceGenerator) -> Self {
        Self { board, generator }
    }

    #[must_use]
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// Makes sure there is a falling piece and a queued next piece.
    pub fn ensure_spawn(&mut self) {
        if self.board.falling_piece().is_none() {
            if self.board.next_piece().is_none() {
                self.board.set_next_piece(self.generator.next_kind());
            }
            self.board.place_next_piece();
        }
        if self.board.next_piece().is_none() {
            self.board.set_next_piece(self.generator.next_kind());
        }
    }

    /// Applies one action to the falling piece.
    ///
    /// Returns `Ok(true)` if the piece landed.
    pub fn apply_action(&mut self, action: Action) -> Result<bool, NoActivePieceError> {
        match action {
            Action::Move(direction) => self.board.move_piece(direction),
            Action::Rotate(rotation) => self.board.rotate_piece(rotation),
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.board.is_alive()
    }
}
