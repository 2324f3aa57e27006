//! Playing a whole game.

use blockdrop_engine::{GameBoard, GameField, NoActivePieceError};
use serde::Serialize;

use crate::player::Player;

/// Outcome of [`play_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    /// Decisions requested from the player.
    pub steps: usize,
    pub landed_pieces: usize,
    pub cleared_lines: usize,
    pub score: u64,
    /// `true` if the session ended because a new piece could not be placed.
    pub game_over: bool,
}

/// Lets `player` play on `field` for at most `step_limit` decisions.
///
/// Each step tops up the falling and queued pieces, stops if the game is
/// over, then applies the player's actions until one of them lands the piece.
///
/// # Example
///
/// ```
/// use blockdrop_ai::{player::HeuristicPlayer, session::play_session};
/// use blockdrop_engine::{GameField, PieceSeed};
///
/// let mut field = GameField::with_seed(10, 20, PieceSeed::from_u64(1));
/// let stats = play_session(&mut HeuristicPlayer::default(), &mut field, 10).unwrap();
/// assert_eq!(stats.steps, 10);
/// assert_eq!(stats.landed_pieces, 10);
/// ```
pub fn play_session<P>(
    player: &mut P,
    field: &mut GameField,
    step_limit: usize,
) -> Result<SessionStats, NoActivePieceError>
where
    P: Player<GameBoard> + ?Sized,
{
    let mut stats = SessionStats::default();

    for _ in 0..step_limit {
        field.ensure_spawn();
        if field.is_game_over() {
            break;
        }

        let actions = player.choose_action(field.board())?;
        stats.steps += 1;
        for action in actions {
            if field.apply_action(action)? {
                stats.landed_pieces += 1;
                tracing::debug!(
                    step = stats.steps,
                    score = field.board().score(),
                    "piece landed"
                );
                break;
            }
        }
    }

    let board = field.board();
    stats.cleared_lines = board.cleared_lines();
    stats.score = board.score();
    stats.game_over = field.is_game_over();
    tracing::info!(
        steps = stats.steps,
        landed_pieces = stats.landed_pieces,
        cleared_lines = stats.cleared_lines,
        score = stats.score,
        game_over = stats.game_over,
        "session finished"
    );
    Ok(stats)
}
