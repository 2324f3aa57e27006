pub use self::{board::*, movement::*, piece::*};

pub(crate) mod board;
pub(crate) mod movement;
pub(crate) mod piece;
