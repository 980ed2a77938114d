//! The game session: one level, its move history and the counters shown
//! around it.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::{
    is_won, BlockReason, Direction, GameState, Grid, History, MoveOutcome, MoveRecord,
    UndoOutcome,
};
use crate::level::{load_level, parse_level, save_level, save_move_log, LevelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    Undo,
    Restart,
    ZoomIn,
    ZoomOut,
    Abandon,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Playing,
    Won,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Move(MoveOutcome),
    Undo(UndoOutcome),
    Zoom(u8),
    /// Restart and abandon need input from the shell before they can run.
    NeedsShell(Command),
    Quit,
    /// The command does not apply in the current state.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LevelSource {
    File(PathBuf),
    Inline(String),
}

/// Where to persist an abandoned game. `None` skips that artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveRequest {
    pub board: Option<PathBuf>,
    pub moves: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary<'a> {
    pub grid: &'a Grid,
    pub level_name: &'a str,
    pub moves: usize,
    pub attempts: u32,
    pub zoom: u8,
    pub state: SessionState,
    pub last_blocked: Option<BlockReason>,
}

pub struct Session {
    config: Config,
    state: SessionState,
    source: Option<LevelSource>,
    level_name: String,
    game: Option<GameState>,
    history: History,
    attempts: u32,
    zoom: u8,
    last_blocked: Option<BlockReason>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let zoom = config.zoom_min;
        Self {
            config,
            state: SessionState::Loading,
            source: None,
            level_name: String::new(),
            game: None,
            history: History::new(),
            attempts: 1,
            zoom,
            last_blocked: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn moves(&self) -> usize {
        self.history.len()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Why the most recent move was refused, cleared by the next move or undo.
    pub fn last_blocked(&self) -> Option<BlockReason> {
        self.last_blocked
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads a level file. On failure nothing about the session changes.
    pub fn load(&mut self, path: &Path) -> Result<(), LevelError> {
        let game = load_level(path, self.config.grid_size)?;
        self.start(
            LevelSource::File(path.to_path_buf()),
            path.display().to_string(),
            game,
        );
        Ok(())
    }

    pub fn load_str(&mut self, name: &str, text: &str) -> Result<(), LevelError> {
        let game = parse_level(text, self.config.grid_size)?;
        self.start(LevelSource::Inline(text.to_string()), name.to_string(), game);
        Ok(())
    }

    fn start(&mut self, source: LevelSource, level_name: String, game: GameState) {
        info!(level = %level_name, "level loaded");
        self.source = Some(source);
        self.level_name = level_name;
        self.game = Some(game);
        self.history.clear();
        self.last_blocked = None;
        self.attempts = 1;
        self.state = SessionState::Playing;
        self.check_won();
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Quit => return CommandOutcome::Quit,
            Command::Restart | Command::Abandon if self.state == SessionState::Playing => {
                return CommandOutcome::NeedsShell(command);
            }
            _ => {}
        }
        if self.state != SessionState::Playing {
            return CommandOutcome::Ignored;
        }
        let Some(game) = self.game.as_mut() else {
            return CommandOutcome::Ignored;
        };

        let outcome = match command {
            Command::Move(direction) => {
                let outcome = self.history.apply(game, direction);
                self.last_blocked = match outcome {
                    MoveOutcome::Blocked(reason) => {
                        debug!(?direction, ?reason, "move blocked");
                        Some(reason)
                    }
                    _ => None,
                };
                CommandOutcome::Move(outcome)
            }
            Command::Undo => {
                self.last_blocked = None;
                CommandOutcome::Undo(self.history.undo(game))
            }
            Command::ZoomIn => {
                self.zoom = self.zoom.saturating_add(1).min(self.config.zoom_max);
                CommandOutcome::Zoom(self.zoom)
            }
            Command::ZoomOut => {
                self.zoom = self.zoom.saturating_sub(1).max(self.config.zoom_min);
                CommandOutcome::Zoom(self.zoom)
            }
            Command::Restart | Command::Abandon | Command::Quit => CommandOutcome::Ignored,
        };
        self.check_won();
        outcome
    }

    /// `None` when no level is in play.
    pub fn move_player(&mut self, direction: Direction) -> Option<MoveOutcome> {
        match self.apply(Command::Move(direction)) {
            CommandOutcome::Move(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn undo(&mut self) -> UndoOutcome {
        match self.apply(Command::Undo) {
            CommandOutcome::Undo(outcome) => outcome,
            _ => UndoOutcome::Empty,
        }
    }

    /// Reloads the level from its source. Returns whether a restart happened.
    pub fn restart(&mut self, confirmed: bool) -> Result<bool, LevelError> {
        if !confirmed || self.state != SessionState::Playing {
            return Ok(false);
        }
        let game = match &self.source {
            Some(LevelSource::File(path)) => load_level(path, self.config.grid_size)?,
            Some(LevelSource::Inline(text)) => parse_level(text, self.config.grid_size)?,
            None => return Ok(false),
        };
        self.game = Some(game);
        self.history.clear();
        self.last_blocked = None;
        self.attempts += 1;
        info!(attempt = self.attempts, level = %self.level_name, "level restarted");
        self.check_won();
        Ok(true)
    }

    /// Persists what the request asks for, then gives up on the level.
    pub fn abandon(&mut self, request: &SaveRequest) -> Result<(), LevelError> {
        if self.state != SessionState::Playing {
            return Ok(());
        }
        if let Some(game) = &self.game {
            if let Some(path) = &request.board {
                save_level(path, &game.grid)?;
                info!(path = %path.display(), "board saved");
            }
        }
        if let Some(path) = &request.moves {
            save_move_log(path, &self.history)?;
            info!(path = %path.display(), "move log saved");
        }
        self.give_up();
        Ok(())
    }

    /// Abandons the level without writing anything.
    pub fn give_up(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        info!(moves = self.moves(), attempts = self.attempts, "level abandoned");
        self.state = SessionState::Abandoned;
    }

    /// Re-executes recorded moves. Stops at the first record that no longer
    /// matches the board and returns how many were applied.
    pub fn replay(&mut self, records: &[MoveRecord]) -> usize {
        for (applied, record) in records.iter().enumerate() {
            let Some(outcome) = self.move_player(record.direction) else {
                return applied;
            };
            match outcome.record(record.direction) {
                Some(done) if done == *record => {}
                Some(_) => {
                    warn!(index = applied, "replayed move disagrees with log, undoing");
                    self.undo();
                    return applied;
                }
                None => {
                    warn!(index = applied, "replayed move blocked");
                    return applied;
                }
            }
        }
        records.len()
    }

    /// Leaves Won or Abandoned so the shell can ask for another level.
    pub fn finish(&mut self) {
        if matches!(self.state, SessionState::Won | SessionState::Abandoned) {
            self.state = SessionState::Loading;
        }
    }

    pub fn summary(&self) -> Option<SessionSummary<'_>> {
        self.game.as_ref().map(|game| SessionSummary {
            grid: &game.grid,
            level_name: &self.level_name,
            moves: self.moves(),
            attempts: self.attempts,
            zoom: self.zoom,
            state: self.state,
            last_blocked: self.last_blocked,
        })
    }

    fn check_won(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        if let Some(game) = &self.game {
            if is_won(&game.grid) {
                info!(moves = self.moves(), attempts = self.attempts, "level won");
                self.state = SessionState::Won;
            }
        }
    }
}
