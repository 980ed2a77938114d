//! Runtime configuration, read from an optional TOML file.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::level::MAX_GRID_SIZE;
use crate::session::Command;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Side length N of the N×N level format.
    pub grid_size: usize,
    pub zoom_min: u8,
    pub zoom_max: u8,
    pub keys: Keymap,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: 12,
            zoom_min: 1,
            zoom_max: 3,
            keys: Keymap::default(),
            log_file: PathBuf::from("sokoterm.log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Keymap {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
    pub undo: char,
    pub restart: char,
    pub zoom_in: char,
    pub zoom_out: char,
    pub abandon: char,
    pub quit: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            up: 'w',
            down: 's',
            left: 'a',
            right: 'd',
            undo: 'u',
            restart: 'r',
            zoom_in: '+',
            zoom_out: '-',
            abandon: 'x',
            quit: 'q',
        }
    }
}

impl Keymap {
    pub fn bindings(&self) -> [(char, Command); 10] {
        use crate::core::Direction::*;
        [
            (self.up, Command::Move(Up)),
            (self.down, Command::Move(Down)),
            (self.left, Command::Move(Left)),
            (self.right, Command::Move(Right)),
            (self.undo, Command::Undo),
            (self.restart, Command::Restart),
            (self.zoom_in, Command::ZoomIn),
            (self.zoom_out, Command::ZoomOut),
            (self.abandon, Command::Abandon),
            (self.quit, Command::Quit),
        ]
    }

    /// Looks the key up as typed, then lowercased. Unbound keys map to nothing.
    pub fn command_for(&self, key: char) -> Option<Command> {
        let bindings = self.bindings();
        let find = |k: char| bindings.iter().find(|(c, _)| *c == k).map(|&(_, cmd)| cmd);
        find(key).or_else(|| find(key.to_ascii_lowercase()))
    }
}

#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Config {
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::new(format!(
                "grid_size {} is outside 1..={}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }
        if self.zoom_min == 0 || self.zoom_min > self.zoom_max {
            return Err(ConfigError::new(format!(
                "zoom range {}..={} is empty or starts at 0",
                self.zoom_min, self.zoom_max
            )));
        }
        let bindings = self.keys.bindings();
        for (n, (key, command)) in bindings.iter().enumerate() {
            if let Some((_, other)) = bindings[n + 1..].iter().find(|(k, _)| k == key) {
                return Err(ConfigError::new(format!(
                    "key {:?} bound to both {:?} and {:?}",
                    key, command, other
                )));
            }
        }
        Ok(())
    }
}
