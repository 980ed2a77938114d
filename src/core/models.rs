use derive_more::Display;

use crate::core::Grid;

/// Content of a single grid cell. The two `...OnTarget` kinds are the only
/// way a movable entity and a target share a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Wall,
    Box,
    Target,
    Player,
    PlayerOnTarget,
    BoxOnTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub i: i32,
    pub j: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BlockReason {
    #[display("edge of the board")]
    OutOfBounds,
    #[display("wall")]
    Wall,
    #[display("box cannot move")]
    BoxStuck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Blocked(BlockReason),
    Moved,
    Pushed,
}

/// One executed move, enough to invert it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub direction: Direction,
    pub pushed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Undone(MoveRecord),
    Empty,
}

/// The grid plus the cached player position; `grid[player]` is always a player tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub grid: Grid,
    pub player: Vec2,
}
