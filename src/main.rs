// Terminal Sokoban with ratatui
// Controls: W/A/S/D or arrow keys, U undo, R restart, +/- zoom, X give up, Q quit.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

use anyhow::{Result, anyhow};
use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sokoterm::app::{App, Flow};
use sokoterm::cli::Cli;
use sokoterm::console_interface::{cleanup_terminal, handle_input, render_game, setup_terminal};
use sokoterm::level::load_move_log;
use sokoterm::session::Session;
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // Log to a file; the terminal belongs to the TUI.
    let log_file = std::fs::File::create(&config.log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(grid_size = config.grid_size, "starting sokoterm");

    let replay = match &cli.replay {
        Some(path) => Some(load_move_log(path)?),
        None => None,
    };

    let mut session = Session::new(config);
    let mut load_error = None;
    if let Some(level) = &cli.level {
        // An unreadable first level is reported in the shell, which asks again.
        if let Err(err) = session.load(level) {
            error!(error = %err, "initial level failed to load");
            load_error = Some(err.to_string());
        }
    }

    let mut app = App::new(session);
    if let Some(message) = load_error {
        app.show_error(message);
    }
    if let Some(records) = replay {
        app = app.with_replay(records);
    }

    let mut terminal = setup_terminal().map_err(|e| anyhow!("terminal setup failed: {e}"))?;
    let result = run_interactive(&mut app, &mut terminal);
    cleanup_terminal().map_err(|e| anyhow!("terminal cleanup failed: {e}"))?;

    if let Some(summary) = app.session.summary() {
        info!(moves = summary.moves, attempts = summary.attempts, state = ?summary.state, "session ended");
    }
    result
}

fn run_interactive(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    render_game(terminal, &app.render_state()).map_err(|e| anyhow!("render failed: {e}"))?;

    loop {
        let input = handle_input().map_err(|e| anyhow!("error reading input: {e}"))?;
        if app.handle(input) == Flow::Exit {
            break;
        }
        render_game(terminal, &app.render_state()).map_err(|e| anyhow!("render failed: {e}"))?;
    }

    Ok(())
}
