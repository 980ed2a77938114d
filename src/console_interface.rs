use crate::config::Keymap;
use crate::core::{Direction, Grid, Tile};
use crate::models::{GameRenderState, Prompt};
use crate::session::Command;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let header = Paragraph::new(header_lines(state))
            .block(Block::default().borders(Borders::ALL).title("SOKOBAN"))
            .style(Style::default().fg(Color::White));
        f.render_widget(header, chunks[0]);

        // Game area
        let board = match &state.summary {
            Some(summary) => grid_lines(summary.grid, summary.zoom),
            None => vec![Line::from("No level loaded")],
        };
        let game_paragraph = Paragraph::new(board)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[1]);

        let footer = footer_text(state);
        let footer_paragraph = Paragraph::new(footer)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(footer_paragraph, chunks[2]);
    })?;
    Ok(())
}

fn header_lines(state: &GameRenderState) -> Vec<Line<'static>> {
    let keys = state.keys;
    let mut lines = Vec::new();
    if let Some(summary) = &state.summary {
        lines.push(Line::from(format!("Level: {}", summary.level_name)));
    }
    lines.push(Line::from(format!(
        "Up: {} | Down: {} | Left: {} | Right: {} (or arrow keys)",
        keys.up, keys.down, keys.left, keys.right
    )));
    lines.push(Line::from(format!(
        "Zoom in: {} | Zoom out: {} | Undo: {}",
        keys.zoom_in, keys.zoom_out, keys.undo
    )));
    lines.push(Line::from(format!(
        "Give up: {} | Restart: {} | Quit: {} (or Esc)",
        keys.abandon, keys.restart, keys.quit
    )));
    if let Some(summary) = &state.summary {
        let mut status = format!(
            "Moves: {} | Attempt: {} | Zoom: x{}",
            summary.moves, summary.attempts, summary.zoom
        );
        if let Some(reason) = summary.last_blocked {
            status.push_str(&format!(" | Blocked: {}", reason));
        }
        lines.push(Line::from(status));
    }
    lines
}

fn footer_text(state: &GameRenderState) -> String {
    let text = match state.prompt {
        Some(Prompt::LevelPath) => format!("Level file (\"e\" to exit): {}_", state.input),
        Some(Prompt::ConfirmRestart) => "Restart this level? (y/n)".to_string(),
        Some(Prompt::SaveChoice) => {
            "Save before giving up? (a = board + moves / o = board / n = no, Esc = keep playing)".to_string()
        }
        Some(Prompt::BoardPath) => format!("Save board to: {}_", state.input),
        Some(Prompt::MovesPath) => format!("Save moves to: {}_", state.input),
        Some(Prompt::Banner(message)) => format!("{} Press any key.", message),
        None => "Push every box onto a target".to_string(),
    };
    match state.error {
        Some(err) => format!("{} | Error: {}", text, err),
        None => text,
    }
}

/// Rows worth drawing: trailing rows that are entirely empty floor are dropped.
fn useful_rows(grid: &Grid) -> usize {
    let rows: Vec<&[Tile]> = grid.rows().collect();
    rows.iter()
        .rposition(|row| row.iter().any(|&c| c != Tile::Empty))
        .map_or(0, |last| last + 1)
}

fn tile_span(tile: Tile, zoom: usize) -> Span<'static> {
    let (ch, style) = match tile {
        Tile::Player => ('@', Style::default().fg(Color::Yellow)),
        Tile::PlayerOnTarget => ('@', Style::default().fg(Color::Red)),
        Tile::BoxOnTarget => ('$', Style::default().fg(Color::Green)),
        Tile::Target => ('.', Style::default().fg(Color::Red)),
        other => (other.glyph(), Style::default()),
    };
    Span::styled(ch.to_string().repeat(zoom), style)
}

pub fn grid_lines(grid: &Grid, zoom: u8) -> Vec<Line<'static>> {
    let zoom = zoom.max(1) as usize;
    let mut lines = Vec::new();
    for row in grid.rows().take(useful_rows(grid)) {
        let line = Line::from(row.iter().map(|&c| tile_span(c, zoom)).collect::<Vec<_>>());
        for _ in 0..zoom {
            lines.push(line.clone());
        }
    }
    lines
}

/// Plain-text version of what `grid_lines` draws.
pub fn render_grid_to_string(grid: &Grid, zoom: u8) -> String {
    let mut result = String::new();
    for line in grid_lines(grid, zoom) {
        for span in line.spans {
            result.push_str(&span.content);
        }
        result.push('\n');
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Char(char),
    Arrow(Direction),
    Enter,
    Backspace,
    Escape,
    Timeout,
    Unknown,
}

pub fn handle_input() -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char(c) => ConsoleInput::Char(c),
                KeyCode::Up => ConsoleInput::Arrow(Direction::Up),
                KeyCode::Down => ConsoleInput::Arrow(Direction::Down),
                KeyCode::Left => ConsoleInput::Arrow(Direction::Left),
                KeyCode::Right => ConsoleInput::Arrow(Direction::Right),
                KeyCode::Enter => ConsoleInput::Enter,
                KeyCode::Backspace => ConsoleInput::Backspace,
                KeyCode::Esc => ConsoleInput::Escape,
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}

/// Keys used while playing; prompts read raw characters instead.
pub fn command_from_input(keys: &Keymap, input: ConsoleInput) -> Option<Command> {
    match input {
        ConsoleInput::Char(c) => keys.command_for(c),
        ConsoleInput::Arrow(direction) => Some(Command::Move(direction)),
        ConsoleInput::Escape => Some(Command::Quit),
        _ => None,
    }
}
