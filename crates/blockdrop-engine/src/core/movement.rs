use serde::{Deserialize, Serialize};

/// Horizontal shift, soft drop or hard drop of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Down,
    Drop,
}

/// Quarter turn of the falling piece around its rotation centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    Clockwise,
    Anticlockwise,
}

/// A single primitive input applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Move(Direction),
    Rotate(Rotation),
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Rotation> for Action {
    fn from(rotation: Rotation) -> Self {
        Action::Rotate(rotation)
    }
}
