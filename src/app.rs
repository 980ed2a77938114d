//! Interactive shell around a [`Session`]: prompts, confirmation and the
//! completion banner.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::console_interface::{command_from_input, ConsoleInput};
use crate::core::MoveRecord;
use crate::models::{GameRenderState, Prompt};
use crate::session::{Command, CommandOutcome, SaveRequest, Session, SessionState};

/// What the shell loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App {
    pub session: Session,
    prompt: Option<Prompt>,
    input: String,
    error: Option<String>,
    save_request: SaveRequest,
    pending_replay: Option<Vec<MoveRecord>>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let prompt = match session.state() {
            SessionState::Loading => Some(Prompt::LevelPath),
            _ => None,
        };
        let mut app = Self {
            session,
            prompt,
            input: String::new(),
            error: None,
            save_request: SaveRequest::default(),
            pending_replay: None,
        };
        app.after_command();
        app
    }

    /// Moves to apply once the first level is in play.
    pub fn with_replay(mut self, records: Vec<MoveRecord>) -> Self {
        self.pending_replay = Some(records);
        self.run_pending_replay();
        self
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn render_state(&self) -> GameRenderState<'_> {
        GameRenderState {
            summary: self.session.summary(),
            prompt: self.prompt.as_ref(),
            input: &self.input,
            error: self.error.as_deref(),
            keys: &self.session.config().keys,
        }
    }

    pub fn handle(&mut self, input: ConsoleInput) -> Flow {
        if input == ConsoleInput::Timeout {
            return Flow::Continue;
        }
        match self.prompt.take() {
            None => self.handle_play(input),
            Some(prompt) => self.handle_prompt(prompt, input),
        }
    }

    fn handle_play(&mut self, input: ConsoleInput) -> Flow {
        let Some(command) = command_from_input(&self.session.config().keys, input) else {
            return Flow::Continue;
        };
        self.error = None;
        match self.session.apply(command) {
            CommandOutcome::Quit => return Flow::Exit,
            CommandOutcome::NeedsShell(Command::Restart) => {
                self.prompt = Some(Prompt::ConfirmRestart);
            }
            CommandOutcome::NeedsShell(_) => {
                self.save_request = SaveRequest::default();
                self.prompt = Some(Prompt::SaveChoice);
            }
            _ => {}
        }
        self.after_command();
        Flow::Continue
    }

    fn handle_prompt(&mut self, prompt: Prompt, input: ConsoleInput) -> Flow {
        match prompt {
            Prompt::Banner(_) => {
                self.session.finish();
                self.prompt = Some(Prompt::LevelPath);
                Flow::Continue
            }
            Prompt::ConfirmRestart => {
                let confirmed = matches!(input, ConsoleInput::Char('y' | 'Y' | 'o' | 'O'));
                if let Err(err) = self.session.restart(confirmed) {
                    warn!(error = %err, "restart failed");
                    self.error = Some(err.to_string());
                }
                self.after_command();
                Flow::Continue
            }
            Prompt::SaveChoice => {
                match input {
                    ConsoleInput::Char('a' | 'A') => {
                        self.save_request.moves = Some(PathBuf::new());
                        self.prompt = Some(Prompt::BoardPath);
                    }
                    ConsoleInput::Char('o' | 'O') => self.prompt = Some(Prompt::BoardPath),
                    ConsoleInput::Char('n' | 'N') | ConsoleInput::Enter => self.finish_abandon(),
                    ConsoleInput::Escape => {}
                    _ => self.prompt = Some(Prompt::SaveChoice),
                }
                Flow::Continue
            }
            Prompt::LevelPath | Prompt::BoardPath | Prompt::MovesPath => {
                self.handle_text(prompt, input)
            }
        }
    }

    fn handle_text(&mut self, prompt: Prompt, input: ConsoleInput) -> Flow {
        match input {
            ConsoleInput::Char(c) => self.input.push(c),
            ConsoleInput::Backspace => {
                self.input.pop();
            }
            ConsoleInput::Escape if prompt == Prompt::LevelPath => return Flow::Exit,
            ConsoleInput::Enter => {
                let text = std::mem::take(&mut self.input);
                return self.submit(prompt, text.trim().to_string());
            }
            _ => {}
        }
        self.prompt = Some(prompt);
        Flow::Continue
    }

    fn submit(&mut self, prompt: Prompt, text: String) -> Flow {
        match prompt {
            Prompt::LevelPath => {
                if text == "e" {
                    info!("exit requested from level prompt");
                    return Flow::Exit;
                }
                match self.session.load(&PathBuf::from(&text)) {
                    Ok(()) => {
                        self.error = None;
                        self.run_pending_replay();
                        self.after_command();
                    }
                    Err(err) => {
                        warn!(error = %err, "level load failed");
                        self.error = Some(err.to_string());
                        self.prompt = Some(Prompt::LevelPath);
                    }
                }
            }
            Prompt::BoardPath => {
                self.save_request.board = Some(PathBuf::from(text));
                if self.save_request.moves.is_some() {
                    self.prompt = Some(Prompt::MovesPath);
                } else {
                    self.finish_abandon();
                }
            }
            Prompt::MovesPath => {
                self.save_request.moves = Some(PathBuf::from(text));
                self.finish_abandon();
            }
            _ => self.prompt = Some(prompt),
        }
        Flow::Continue
    }

    fn finish_abandon(&mut self) {
        let request = std::mem::take(&mut self.save_request);
        if let Err(err) = self.session.abandon(&request) {
            warn!(error = %err, "saving abandoned game failed");
            self.error = Some(err.to_string());
            // Give up even when saving failed.
            self.session.give_up();
        }
        self.after_command();
    }

    fn run_pending_replay(&mut self) {
        if self.session.state() != SessionState::Playing {
            return;
        }
        if let Some(records) = self.pending_replay.take() {
            let applied = self.session.replay(&records);
            info!(applied, total = records.len(), "move log replayed");
            if applied < records.len() {
                self.error = Some(format!("replay stopped after {} of {} moves", applied, records.len()));
            }
            self.after_command();
        }
    }

    fn after_command(&mut self) {
        if self.prompt.is_some() {
            return;
        }
        let banner = match self.session.state() {
            SessionState::Won => Some(format!(
                "You won! It took {} moves and {} attempt(s) to finish this level.",
                self.session.moves(),
                self.session.attempts()
            )),
            SessionState::Abandoned => Some(format!(
                "You gave up after {} moves.",
                self.session.moves()
            )),
            SessionState::Loading => {
                self.prompt = Some(Prompt::LevelPath);
                None
            }
            SessionState::Playing => None,
        };
        if let Some(message) = banner {
            self.prompt = Some(Prompt::Banner(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const LEVEL: &str = "\
#####
#@$.#
#####
";

    fn playing_app() -> App {
        let config = Config {
            grid_size: 5,
            ..Config::default()
        };
        let mut session = Session::new(config);
        session.load_str("inline", LEVEL).unwrap();
        App::new(session)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(ConsoleInput::Char(c));
        }
        app.handle(ConsoleInput::Enter);
    }

    #[test]
    fn fresh_session_asks_for_a_level() {
        let app = App::new(Session::new(Config::default()));
        assert_eq!(app.prompt(), Some(&Prompt::LevelPath));
    }

    #[test]
    fn missing_level_file_keeps_prompting() {
        let mut app = App::new(Session::new(Config::default()));
        type_text(&mut app, "/nonexistent/sokoterm/level.txt");
        assert_eq!(app.prompt(), Some(&Prompt::LevelPath));
        assert_eq!(app.session.state(), SessionState::Loading);
        assert!(app.error().is_some());
    }

    #[test]
    fn typing_e_exits() {
        let mut app = App::new(Session::new(Config::default()));
        app.handle(ConsoleInput::Char('e'));
        assert_eq!(app.handle(ConsoleInput::Enter), Flow::Exit);
    }

    #[test]
    fn winning_shows_banner_then_returns_to_level_prompt() {
        let mut app = playing_app();
        app.handle(ConsoleInput::Char('d'));
        assert!(matches!(app.prompt(), Some(Prompt::Banner(msg)) if msg.contains("1 moves")));
        app.handle(ConsoleInput::Char(' '));
        assert_eq!(app.prompt(), Some(&Prompt::LevelPath));
        assert_eq!(app.session.state(), SessionState::Loading);
    }

    #[test]
    fn declined_restart_keeps_moves() {
        let mut app = playing_app();
        app.handle(ConsoleInput::Char('a'));
        app.handle(ConsoleInput::Char('r'));
        assert_eq!(app.prompt(), Some(&Prompt::ConfirmRestart));
        app.handle(ConsoleInput::Char('n'));
        assert_eq!(app.prompt(), None);
        assert_eq!(app.session.attempts(), 1);
    }

    #[test]
    fn confirmed_restart_counts_an_attempt() {
        let mut app = playing_app();
        app.handle(ConsoleInput::Char('r'));
        app.handle(ConsoleInput::Char('y'));
        assert_eq!(app.session.attempts(), 2);
        assert_eq!(app.session.moves(), 0);
    }

    #[test]
    fn abandon_without_saving_shows_banner() {
        let mut app = playing_app();
        app.handle(ConsoleInput::Char('x'));
        assert_eq!(app.prompt(), Some(&Prompt::SaveChoice));
        app.handle(ConsoleInput::Char('n'));
        assert_eq!(app.session.state(), SessionState::Abandoned);
        assert!(matches!(app.prompt(), Some(Prompt::Banner(_))));
    }

    #[test]
    fn abandon_with_board_and_moves_writes_both() {
        let dir = std::env::temp_dir();
        let board = dir.join(format!("sokoterm-app-board-{}.txt", std::process::id()));
        let moves = dir.join(format!("sokoterm-app-moves-{}.txt", std::process::id()));

        let mut app = playing_app();
        app.handle(ConsoleInput::Arrow(crate::core::Direction::Left));
        app.handle(ConsoleInput::Char('x'));
        app.handle(ConsoleInput::Char('a'));
        type_text(&mut app, board.to_str().unwrap());
        assert_eq!(app.prompt(), Some(&Prompt::MovesPath));
        type_text(&mut app, moves.to_str().unwrap());

        assert_eq!(app.session.state(), SessionState::Abandoned);
        let saved_board = std::fs::read_to_string(&board).unwrap();
        let saved_moves = std::fs::read_to_string(&moves).unwrap();
        std::fs::remove_file(&board).ok();
        std::fs::remove_file(&moves).ok();
        assert_eq!(saved_board.lines().nth(1), Some("#@$.#"));
        assert_eq!(saved_moves, "");
    }

    #[test]
    fn unwritable_save_still_abandons() {
        let board = std::env::temp_dir().join("sokoterm-missing-dir").join("nested").join("board.txt");
        let mut app = playing_app();
        app.handle(ConsoleInput::Char('x'));
        app.handle(ConsoleInput::Char('o'));
        type_text(&mut app, board.to_str().unwrap());
        assert_eq!(app.session.state(), SessionState::Abandoned);
        assert!(app.error().is_some());
        assert!(matches!(app.prompt(), Some(Prompt::Banner(_))));
    }

    #[test]
    fn quit_key_exits_while_playing() {
        let mut app = playing_app();
        assert_eq!(app.handle(ConsoleInput::Char('q')), Flow::Exit);
    }
}
