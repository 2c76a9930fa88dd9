//! Application state for the memchat TUI.

use crate::transcript::{Transcript, TurnOutcome};
use crossterm::event::KeyEvent;

/// Application event emitted by input handlers or background turns.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick (redraw).
    Tick,
    /// Outcome of the in-flight turn.
    Turn(TurnOutcome),
}

/// Top-level state for the TUI.
pub struct App {
    /// Session user id obtained from the server loader.
    pub user_id: String,
    /// Chat transcript.
    pub transcript: Transcript,
    /// Current input buffer.
    pub input: String,
    /// Set when the user asks to quit.
    pub should_quit: bool,
}

impl App {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            transcript: Transcript::new(),
            input: String::new(),
            should_quit: false,
        }
    }
}
