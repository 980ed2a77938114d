//! Command-line interface for sokoterm.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

/// Terminal Sokoban: push every box onto a target
#[derive(Parser, Debug)]
#[command(name = "sokoterm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Level file to start with. Without it the game asks for one.
    pub level: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Side length of the square level format (overrides the config file)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Move log to replay once the first level is loaded
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Where to write logs (overrides the config file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_flag_overrides_default() {
        let cli = Cli::parse_from(["sokoterm", "--size", "8", "level.txt"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.grid_size, 8);
        assert_eq!(cli.level, Some(PathBuf::from("level.txt")));
    }

    #[test]
    fn oversized_size_is_rejected() {
        let cli = Cli::parse_from(["sokoterm", "--size", "46341"]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn zero_size_is_rejected() {
        let cli = Cli::parse_from(["sokoterm", "--size", "0"]);
        assert!(cli.resolve_config().is_err());
    }
}
