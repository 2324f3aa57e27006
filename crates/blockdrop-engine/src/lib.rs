//! Board mechanics for the falling-block game driven by `blockdrop-ai`.
//!
//! - [`core`] holds the data structures: pieces, the cell board and the
//!   movement vocabulary shared with the AI.
//! - [`engine`] layers a random piece source on top of the board so a whole
//!   game can be played out.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Raised when a move, rotation or drop is requested while no piece is falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no active piece to move")]
pub struct NoActivePieceError;

/// Failure while parsing a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid cell {ch:?} at ({x}, {y})")]
    InvalidCell { ch: char, x: usize, y: usize },
}

/// A piece seed that is not exactly 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {_0:?}: expected 32 hex digits")]
pub struct ParseSeedError(#[error(not(source))] String);
