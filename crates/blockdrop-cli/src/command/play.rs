use std::path::{Path, PathBuf};

use blockdrop_ai::{
    player::{ExtendedPlayer, HeuristicPlayer, Player, RandomPlayer},
    session::{self, SessionStats},
    weights::{ExtendedWeights, Weights},
};
use blockdrop_engine::{GameBoard, GameField, PieceSeed};
use rand::Rng as _;
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub(crate) enum PlayerKind {
    /// Place every piece where the move search scores best
    #[default]
    Heuristic,
    /// Score placements with the eleven-feature evaluator and steer from the centre
    Extended,
    /// Pick a random move every step
    Random,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Who plays the game
    #[arg(long, value_enum, default_value_t)]
    player: PlayerKind,
    /// Board width in cells
    #[arg(long, default_value_t = 10)]
    width: usize,
    /// Board height in cells
    #[arg(long, default_value_t = 24)]
    height: usize,
    /// Seed for the piece sequence and the random player [default: random]
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many player decisions
    #[arg(long, default_value_t = 1000)]
    max_steps: usize,
    /// Path to a JSON weights file for the heuristic or extended player
    #[arg(long)]
    weights: Option<PathBuf>,
}

/// Printed after a game; `seed` replays it with `--seed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PlayReport {
    seed: u64,
    piece_seed: PieceSeed,
    stats: SessionStats,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        player,
        width,
        height,
        seed,
        max_steps,
        weights,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut player = build_player(*player, weights.as_deref(), seed)?;
    let (report, field) = play_game(&mut *player, *width, *height, seed, *max_steps)?;

    print!("{}", field.board());
    util::write_json_stdout(&report)?;
    Ok(())
}

fn build_player(
    kind: PlayerKind,
    weights: Option<&Path>,
    seed: u64,
) -> anyhow::Result<Box<dyn Player<GameBoard>>> {
    let player: Box<dyn Player<GameBoard>> = match kind {
        PlayerKind::Heuristic => {
            let weights = match weights {
                Some(path) => util::read_weights_file(path)?,
                None => Weights::default(),
            };
            Box::new(HeuristicPlayer::new(weights))
        }
        PlayerKind::Extended => {
            let weights = match weights {
                Some(path) => util::read_extended_weights_file(path)?,
                None => ExtendedWeights::default(),
            };
            Box::new(ExtendedPlayer::new(weights))
        }
        PlayerKind::Random => Box::new(RandomPlayer::with_seed(seed)),
    };
    Ok(player)
}

fn play_game(
    player: &mut dyn Player<GameBoard>,
    width: usize,
    height: usize,
    seed: u64,
    max_steps: usize,
) -> anyhow::Result<(PlayReport, GameField)> {
    let mut field = GameField::with_seed(width, height, PieceSeed::from_u64(seed));
    tracing::info!(
        width,
        height,
        seed,
        piece_seed = %field.seed(),
        max_steps,
        "starting session"
    );

    let stats = session::play_session(player, &mut field, max_steps)?;
    let report = PlayReport {
        seed,
        piece_seed: field.seed(),
        stats,
    };
    Ok((report, field))
}
