use derive_more::{Display, Error};

use crate::core::model_helpers::vec_from_dir;
use crate::core::update::step;
use crate::core::{Direction, GameState, MoveOutcome, MoveRecord, UndoOutcome};

/// Every executed move since the last load or restart, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<MoveRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveLogError {
    #[display("unknown move code {code:?} at position {index}")]
    UnknownCode { index: usize, code: char },
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Steps the game and logs the move if it was not blocked.
    pub fn apply(&mut self, game: &mut GameState, direction: Direction) -> MoveOutcome {
        let outcome = step(game, direction);
        if let Some(record) = outcome.record(direction) {
            self.records.push(record);
        }
        outcome
    }

    /// Reverts the most recent move. An empty history is a no-op.
    pub fn undo(&mut self, game: &mut GameState) -> UndoOutcome {
        let Some(record) = self.records.pop() else {
            return UndoOutcome::Empty;
        };
        revert(game, record);
        UndoOutcome::Undone(record)
    }

    pub fn to_log(&self) -> String {
        self.records.iter().map(|r| r.code()).collect()
    }

    pub fn parse_log(log: &str) -> Result<Vec<MoveRecord>, MoveLogError> {
        log.trim_end()
            .chars()
            .enumerate()
            .map(|(index, code)| {
                MoveRecord::from_code(code).ok_or(MoveLogError::UnknownCode { index, code })
            })
            .collect()
    }
}

fn revert(game: &mut GameState, record: MoveRecord) {
    let dir = vec_from_dir(record.direction);
    let current = game.player;
    let previous = current - dir;

    if record.pushed {
        let box_at = current + dir;
        let box_tile = game.grid[&box_at];
        game.grid[&box_at] = box_tile.vacated();
        game.grid[&current] = game.grid[&current].vacated().with_box();
    } else {
        game.grid[&current] = game.grid[&current].vacated();
    }

    game.grid[&previous] = game.grid[&previous].with_player();
    game.player = previous;
}

impl MoveRecord {
    /// Lowercase for a plain step, uppercase when a box moved along.
    pub fn code(self) -> char {
        let code = match self.direction {
            Direction::Up => 'h',
            Direction::Down => 'b',
            Direction::Left => 'g',
            Direction::Right => 'd',
        };
        if self.pushed { code.to_ascii_uppercase() } else { code }
    }

    pub fn from_code(code: char) -> Option<MoveRecord> {
        let direction = match code.to_ascii_lowercase() {
            'h' => Direction::Up,
            'b' => Direction::Down,
            'g' => Direction::Left,
            'd' => Direction::Right,
            _ => return None,
        };
        Some(MoveRecord {
            direction,
            pushed: code.is_ascii_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_cover_eight_symbols() {
        let mut seen = Vec::new();
        for direction in Direction::all() {
            for pushed in [false, true] {
                let record = MoveRecord { direction, pushed };
                assert_eq!(MoveRecord::from_code(record.code()), Some(record));
                seen.push(record.code());
            }
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn parse_log_reports_bad_code_position() {
        let err = History::parse_log("hbGx").unwrap_err();
        assert_eq!(err, MoveLogError::UnknownCode { index: 3, code: 'x' });
    }

    #[test]
    fn parse_log_ignores_trailing_newline() {
        let records = History::parse_log("dD\n").unwrap();
        assert_eq!(
            records,
            vec![
                MoveRecord { direction: Direction::Right, pushed: false },
                MoveRecord { direction: Direction::Right, pushed: true },
            ]
        );
    }
}
