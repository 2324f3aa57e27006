//! Players: turn a board into the actions for the falling piece.

use blockdrop_engine::{Action, Board, Direction, NoActivePieceError, Rotation};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    extended_search, move_search,
    weights::{ExtendedWeights, Weights},
};

/// Decides what to do with the falling piece.
///
/// The returned actions are applied in order until one of them lands the
/// piece; the rest are discarded.
pub trait Player<B>
where
    B: Board,
{
    fn choose_action(&mut self, board: &B) -> Result<Vec<Action>, NoActivePieceError>;
}

/// Places every piece where [`move_search::find_best_move`] says.
#[derive(Debug, Clone, Default)]
pub struct HeuristicPlayer {
    weights: Weights,
}

impl HeuristicPlayer {
    #[must_use]
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

impl<B> Player<B> for HeuristicPlayer
where
    B: Board,
{
    fn choose_action(&mut self, board: &B) -> Result<Vec<Action>, NoActivePieceError> {
        let best = move_search::find_best_move(board, &self.weights)?;
        Ok(best.placement.actions())
    }
}

/// Places every piece where [`extended_search::find_best_move_extended`] says.
#[derive(Debug, Clone, Default)]
pub struct ExtendedPlayer {
    weights: ExtendedWeights,
}

impl ExtendedPlayer {
    #[must_use]
    pub fn new(weights: ExtendedWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &ExtendedWeights {
        &self.weights
    }
}

impl<B> Player<B> for ExtendedPlayer
where
    B: Board,
{
    fn choose_action(&mut self, board: &B) -> Result<Vec<Action>, NoActivePieceError> {
        let best = extended_search::find_best_move_extended(board, &self.weights)?;
        Ok(best.placement.centred_actions(board.width()))
    }
}

/// Actions the random player picks from.
const RANDOM_ACTIONS: [Action; 5] = [
    Action::Move(Direction::Left),
    Action::Move(Direction::Right),
    Action::Move(Direction::Down),
    Action::Rotate(Rotation::Anticlockwise),
    Action::Rotate(Rotation::Clockwise),
];

/// Baseline player: one uniformly random action per decision.
///
/// Never drops, so pieces only land through gravity.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: Pcg32,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    /// Creates a player seeded from the thread RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a player whose choices are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl<B> Player<B> for RandomPlayer
where
    B: Board,
{
    fn choose_action(&mut self, _board: &B) -> Result<Vec<Action>, NoActivePieceError> {
        let action = RANDOM_ACTIONS[self.rng.random_range(0..RANDOM_ACTIONS.len())];
        Ok(vec![action])
    }
}
