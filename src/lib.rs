//! Terminal Sokoban. The `core` module holds the game-state engine; the rest
//! is level I/O, the session state machine and the terminal shell.

pub mod app;
pub mod cli;
pub mod config;
pub mod console_interface;
pub mod core;
pub mod level;
pub mod models;
pub mod session;

#[cfg(test)]
mod test;
