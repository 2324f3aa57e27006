use clap::{Parser, Subcommand};

use crate::util;

use self::{best_move::BestMoveArg, play::PlayArg};

mod best_move;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v debug, -vv trace); `RUST_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game with the heuristic or the random player
    Play(#[clap(flatten)] PlayArg),
    /// Print the best placement for a piece on a board read from a file
    BestMove(#[clap(flatten)] BestMoveArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::BestMove(arg) => best_move::run(&arg)?,
    }
    Ok(())
}
