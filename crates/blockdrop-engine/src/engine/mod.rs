//! Game flow on top of the board.
//!
//! - [`GameField`] - board plus random piece source; keeps a falling and a queued piece available
//! - [`PieceGenerator`] - uniform random piece kinds
//! - [`PieceSeed`] - seed for deterministic piece generation
//!
//! # Example
//!
//! ```
//! use blockdrop_engine::{Action, Direction, GameField, PieceSeed};
//!
//! let mut field = GameField::with_seed(10, 20, PieceSeed::from_u64(42));
//! field.ensure_spawn();
//!
//! let landed = field.apply_action(Action::Move(Direction::Drop)).unwrap();
//! assert!(landed);
//! ```

pub use self::{game_field::*, piece_generator::*};

mod game_field;
mod piece_generator;
