//! Level text format: exactly N rows of N glyphs, one row per line.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error, From};
use tracing::{debug, instrument};

use crate::core::{find_players, GameState, Grid, History, MoveLogError, MoveRecord, Tile, Vec2};

/// Largest N accepted for the N×N level format.
pub const MAX_GRID_SIZE: usize = 1024;

#[derive(Debug, Display, Error, From)]
pub enum LevelError {
    #[display("cannot access {}: {source}", path.display())]
    #[from(skip)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("malformed level: {_0}")]
    Malformed(MalformedLevel),
    #[display("malformed move log: {_0}")]
    MoveLog(MoveLogError),
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MalformedLevel {
    #[display("grid size {size} is outside 1..={}", MAX_GRID_SIZE)]
    UnsupportedSize { size: usize },
    #[display("expected at most {expected} rows, found {found}")]
    TooManyRows { expected: usize, found: usize },
    #[display("row {row} has {found} cells, expected at most {expected}")]
    RowTooLong {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        row: usize,
        column: usize,
        glyph: char,
    },
    #[display("no player on the board")]
    NoPlayer,
    #[display("found {count} players, expected exactly one")]
    MultiplePlayers { count: usize },
}

/// Parses an N×N block of glyphs. Short rows and missing trailing rows are
/// padded with empty floor.
pub fn parse_level(text: &str, size: usize) -> Result<GameState, MalformedLevel> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    // A final newline yields one empty trailing segment.
    let lines = match lines.split_last() {
        Some((last, rest)) if last.is_empty() => rest,
        _ => &lines[..],
    };

    if size == 0 || size > MAX_GRID_SIZE {
        return Err(MalformedLevel::UnsupportedSize { size });
    }
    if lines.len() > size {
        return Err(MalformedLevel::TooManyRows {
            expected: size,
            found: lines.len(),
        });
    }

    let mut grid =
        Grid::new_square(size, Tile::Empty).ok_or(MalformedLevel::UnsupportedSize { size })?;
    for (i, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found > size {
            return Err(MalformedLevel::RowTooLong {
                row: i,
                expected: size,
                found,
            });
        }
        for (j, glyph) in line.chars().enumerate() {
            let tile = Tile::from_glyph(glyph).ok_or(MalformedLevel::UnknownGlyph {
                row: i,
                column: j,
                glyph,
            })?;
            grid[&Vec2 {
                i: i as i32,
                j: j as i32,
            }] = tile;
        }
    }

    let players = find_players(&grid);
    match players.as_slice() {
        [] => Err(MalformedLevel::NoPlayer),
        [player] => Ok(GameState {
            player: *player,
            grid,
        }),
        _ => Err(MalformedLevel::MultiplePlayers {
            count: players.len(),
        }),
    }
}

/// Exact inverse of the glyph mapping, every row newline-terminated.
pub fn serialize_level(grid: &Grid) -> String {
    let mut result = String::new();
    for row in grid.rows() {
        for c in row {
            result.push(c.glyph());
        }
        result.push('\n');
    }
    result
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_level(path: &Path, size: usize) -> Result<GameState, LevelError> {
    let text = read_text(path)?;
    let game = parse_level(&text, size)?;
    debug!(player = ?game.player, "level parsed");
    Ok(game)
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn save_level(path: &Path, grid: &Grid) -> Result<(), LevelError> {
    write_text(path, &serialize_level(grid))
}

#[instrument(skip_all, fields(path = %path.display(), moves = history.len()))]
pub fn save_move_log(path: &Path, history: &History) -> Result<(), LevelError> {
    write_text(path, &history.to_log())
}

pub fn load_move_log(path: &Path) -> Result<Vec<MoveRecord>, LevelError> {
    let text = read_text(path)?;
    Ok(History::parse_log(&text)?)
}

fn read_text(path: &Path) -> Result<String, LevelError> {
    std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, text: &str) -> Result<(), LevelError> {
    std::fs::write(path, text).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}
