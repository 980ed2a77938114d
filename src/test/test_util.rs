pub use dissimilar::diff as __diff;
use crate::core::*;
use crate::level::parse_level;

#[macro_export]
macro_rules! assert_eq_text {
    ($left:expr, $right:expr) => {
        assert_eq_text!($left, $right,)
    };
    ($left:expr, $right:expr, $($tt:tt)*) => {{
        let left = $left;
        let right = $right;
        if left != right {
            if left.trim() == right.trim() {
                std::eprintln!("Left:\n{:?}\n\nRight:\n{:?}\n\nWhitespace difference\n", left, right);
            } else {
                let diff = $crate::test::test_util::__diff(left, right);
                std::eprintln!("Left:\n{}\n\nRight:\n{}\n\nDiff:\n{}\n", left, right, $crate::test::test_util::format_diff(diff));
            }
            std::eprintln!($($tt)*);
            panic!("text differs");
        }
    }};
}

pub fn format_diff(chunks: Vec<dissimilar::Chunk>) -> String {
    let mut buf = String::new();
    for chunk in chunks {
        let formatted = match chunk {
            dissimilar::Chunk::Equal(text) => text.into(),
            dissimilar::Chunk::Delete(text) => format!("\x1b[41m{}\x1b[0m", text),
            dissimilar::Chunk::Insert(text) => format!("\x1b[42m{}\x1b[0m", text),
        };
        buf.push_str(&formatted);
    }
    buf
}

/// Side of the smallest square holding the drawn level.
pub fn level_size(level: &str) -> usize {
    let level = level.trim_matches('\n');
    let rows = level.lines().count();
    let columns = level.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    rows.max(columns)
}

pub struct GameTestState {
    pub game_state: GameState,
    pub history: History,
    rows: usize,
    columns: usize,
}

impl GameTestState {
    pub fn new(level: &str) -> Self {
        let level = level.trim_matches('\n');
        let game_state = parse_level(level, level_size(level))
            .unwrap_or_else(|e| panic!("bad test level: {}\n{}", e, level));
        Self {
            game_state,
            history: History::new(),
            rows: level.lines().count(),
            columns: level.lines().map(|l| l.chars().count()).max().unwrap_or(0),
        }
    }

    /// Draws only the rectangle the level was written in.
    pub fn game_to_string(&self) -> String {
        let mut result = String::new();
        for row in self.game_state.grid.rows().take(self.rows) {
            result.extend(row.iter().take(self.columns).map(|c| c.glyph()));
            result.push('\n');
        }
        result.trim_matches('\n').into()
    }

    pub fn assert_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.try_move(direction);
        if outcome.is_blocked() {
            panic!("Expected move {:?} to succeed, got {:?}, in map\n{}", direction, outcome, self.game_to_string());
        }
        outcome
    }

    pub fn assert_moves(&mut self, directions: &[Direction]) {
        for &dir in directions {
            self.assert_move(dir);
        }
    }

    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        self.history.apply(&mut self.game_state, direction)
    }

    pub fn undo(&mut self) -> UndoOutcome {
        self.history.undo(&mut self.game_state)
    }

    pub fn assert_player_tile(&self) {
        let players = find_players(&self.game_state.grid);
        assert_eq!(players, vec![self.game_state.player], "player cache out of sync in map\n{}", self.game_to_string());
    }

    pub fn assert_matches(&self, expected: &str) {
        let actual = self.game_to_string();
        assert_eq_text!(expected.trim_matches('\n'), actual.as_str().trim_matches('\n'));
    }
}
