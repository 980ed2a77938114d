use crate::config::Keymap;
use crate::session::SessionSummary;

/// What the shell is currently waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    LevelPath,
    ConfirmRestart,
    SaveChoice,
    BoardPath,
    MovesPath,
    /// Completion banner; any key continues.
    Banner(String),
}

pub struct GameRenderState<'a> {
    pub summary: Option<SessionSummary<'a>>,
    pub prompt: Option<&'a Prompt>,
    pub input: &'a str,
    pub error: Option<&'a str>,
    pub keys: &'a Keymap,
}
