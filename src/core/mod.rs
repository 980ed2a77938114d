mod bounded_grid;
mod bounds;
mod history;
mod model_helpers;
mod models;
mod update;

pub use bounded_grid::{BoundedGrid, Grid};
pub use bounds::BoundsOriginRoot;
pub use history::{History, MoveLogError};
pub use model_helpers::{find_players, is_won, vec_from_dir};
pub use models::{
    BlockReason, Direction, GameState, MoveOutcome, MoveRecord, Tile, UndoOutcome, Vec2,
};
pub use update::step;
