use crate::core::model_helpers::vec_from_dir;
use crate::core::Tile::{Box, BoxOnTarget, Wall};
use crate::core::{BlockReason, Direction, GameState, MoveOutcome, MoveRecord};

/// Moves the player one cell, pushing a single box if one is in the way.
/// A blocked move leaves the grid untouched.
pub fn step(game: &mut GameState, direction: Direction) -> MoveOutcome {
    let dir = vec_from_dir(direction);
    let next = game.player + dir;

    let Some(&dest) = game.grid.get(&next) else {
        return MoveOutcome::Blocked(BlockReason::OutOfBounds);
    };
    if dest == Wall {
        return MoveOutcome::Blocked(BlockReason::Wall);
    }

    let pushing = dest == Box || dest == BoxOnTarget;

    if pushing {
        let beyond = next + dir;
        let Some(&beyond_tile) = game.grid.get(&beyond) else {
            return MoveOutcome::Blocked(BlockReason::OutOfBounds);
        };
        if beyond_tile == Wall || beyond_tile.is_box() {
            return MoveOutcome::Blocked(BlockReason::BoxStuck);
        }

        // Move box
        game.grid[&beyond] = beyond_tile.with_box();
    }

    // Move player
    let cur = game.grid[&game.player];
    game.grid[&game.player] = cur.vacated();
    game.grid[&next] = dest.vacated().with_player();
    game.player = next;

    if pushing {
        MoveOutcome::Pushed
    } else {
        MoveOutcome::Moved
    }
}

impl MoveOutcome {
    /// The history entry for this outcome, if the move went through.
    pub fn record(self, direction: Direction) -> Option<MoveRecord> {
        match self {
            MoveOutcome::Blocked(_) => None,
            MoveOutcome::Moved => Some(MoveRecord { direction, pushed: false }),
            MoveOutcome::Pushed => Some(MoveRecord { direction, pushed: true }),
        }
    }

    pub fn is_blocked(self) -> bool {
        matches!(self, MoveOutcome::Blocked(_))
    }
}
