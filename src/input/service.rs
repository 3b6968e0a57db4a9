//! High-level input service.
//!
//! Polls crossterm for terminal events and yields domain-level `InputAction`s that the
//! render loop consumes.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// High-level input actions emitted by the input service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Resize { width: u16, height: u16 },
    NoAction,
}

/// Map a key press onto an action.
pub fn key_to_action(key_event: KeyEvent) -> InputAction {
    if key_event.kind != KeyEventKind::Press {
        return InputAction::NoAction;
    }

    match (key_event.code, key_event.modifiers) {
        (KeyCode::Char('q'), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            InputAction::Quit
        }
        (KeyCode::Esc, _) => InputAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
        _ => InputAction::NoAction,
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
#[derive(Debug, Default)]
pub struct InputService;

impl InputService {
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for the next meaningful action.
    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));

        if !event::poll(poll_timeout)? {
            return Ok(None);
        }

        Ok(self.process_event(event::read()?))
    }

    /// Translate a single event, dropping anything the display does not react to.
    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => key_to_action(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction => None,
            _ => Some(action),
        }
    }
}
