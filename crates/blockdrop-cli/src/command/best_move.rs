use std::path::PathBuf;

use blockdrop_ai::{
    extended_search, move_search,
    weights::{ExtendedWeights, Weights},
};
use blockdrop_engine::{Action, BoardView as _, PieceKind};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BestMoveArg {
    /// Text file with the board: one line per row, `.` empty, `#` or a piece letter occupied
    board_path: PathBuf,
    /// Kind of the falling piece
    #[arg(long, value_parser = parse_piece_kind)]
    piece: PieceKind,
    /// Path to a JSON weights file
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Use the eleven-feature evaluator and steer from the centre column
    #[arg(long)]
    extended: bool,
}

#[derive(Debug, Serialize)]
struct BestMove {
    position: usize,
    rotation: usize,
    score: f64,
    actions: Vec<Action>,
}

fn parse_piece_kind(s: &str) -> Result<PieceKind, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => PieceKind::from_char(ch.to_ascii_uppercase())
            .ok_or_else(|| format!("unknown piece kind: {s}")),
        _ => Err(format!("expected a single piece letter, got: {s}")),
    }
}

pub(crate) fn run(arg: &BestMoveArg) -> anyhow::Result<()> {
    let BestMoveArg {
        board_path,
        piece,
        weights,
        extended,
    } = arg;

    let mut board = util::read_board_file(board_path)?;
    board.set_next_piece(*piece);
    board.place_next_piece();
    if !board.is_alive() {
        tracing::warn!(piece = ?piece, "falling piece overlaps the board at spawn");
    }

    let (result, actions) = if *extended {
        let weights = match weights {
            Some(path) => util::read_extended_weights_file(path)?,
            None => ExtendedWeights::default(),
        };
        let result = extended_search::find_best_move_extended(&board, &weights)?;
        (result, result.placement.centred_actions(board.width()))
    } else {
        let weights = match weights {
            Some(path) => util::read_weights_file(path)?,
            None => Weights::default(),
        };
        let result = move_search::find_best_move(&board, &weights)?;
        (result, result.placement.actions())
    };
    util::write_json_stdout(&BestMove {
        position: result.placement.position,
        rotation: result.placement.rotation,
        score: result.score,
        actions,
    })
}
