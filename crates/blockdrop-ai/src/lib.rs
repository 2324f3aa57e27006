//! Heuristic placement AI for the falling-block game.
//!
//! The crate works in three layers:
//!
//! ```text
//! Session runner (play a whole game with a player)
//!     ↓ uses
//! Player (turn a board into a list of actions)
//!     ↓ uses
//! Move search (score every placement on a cloned board)
//! ```
//!
//! - [`board_feature`] - structural features of a board: aggregate height,
//!   smoothness, complete lines and holes
//! - [`weights`] - the linear weights that combine the features into a score
//! - [`placement`] - a (position, rotation) candidate and the fixed table mapping
//!   positions to horizontal shifts
//! - [`move_search`] - single-ply search over all `width × 4` placements
//! - [`extended_search`] - the same enumeration scored with a richer feature set
//! - [`player`] - the heuristic and extended players and a uniformly random baseline
//! - [`session`] - plays a game on a [`GameField`](blockdrop_engine::GameField)
//!
//! The search only talks to the board through the
//! [`Board`](blockdrop_engine::Board) trait. Every candidate is simulated on its
//! own clone, so the caller's board is never touched.
//!
//! # Example
//!
//! ```
//! use blockdrop_ai::{player::{HeuristicPlayer, Player as _}, weights::Weights};
//! use blockdrop_engine::{Action, Direction, GameBoard, PieceKind};
//!
//! let mut board = GameBoard::new(10, 20);
//! board.set_next_piece(PieceKind::T);
//! board.place_next_piece();
//!
//! let mut player = HeuristicPlayer::new(Weights::default());
//! let actions = player.choose_action(&board).unwrap();
//! assert_eq!(actions.last(), Some(&Action::Move(Direction::Drop)));
//! ```

pub mod board_feature;
pub mod extended_search;
pub mod move_search;
pub mod placement;
pub mod player;
pub mod session;
pub mod weights;
