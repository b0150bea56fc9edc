use std::time::Duration;
use tracing::trace;

use crate::domain::{Message, TableConfig, TableError};
use crate::model::Model;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &TableConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, TableError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(key, model));
        }
        Ok(None)
    }

    fn handle_key(&self, key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.raw_keyevents() {
            return Some(Message::RawKey(key));
        }
        if model.awaiting_confirmation() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Message::Confirm),
                KeyCode::Char('n') | KeyCode::Char('N') => Some(Message::Reject),
                KeyCode::Esc => Some(Message::Exit),
                _ => None,
            };
        }
        let message = match (key.code, key.modifiers) {
            // Ctrl+/ arrives as Ctrl+7 on some terminals
            (KeyCode::Char('/'), _) => Some(Message::FocusSearch),
            (KeyCode::Char('7'), KeyModifiers::CONTROL) => Some(Message::FocusSearch),
            (KeyCode::Esc, _) if model.in_table() => Some(Message::ClearSearch),
            (KeyCode::Esc, _) => Some(Message::Exit),
            (KeyCode::Char('q'), _) => Some(Message::Quit),
            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(Message::MoveDown),
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(Message::MoveUp),
            (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(Message::MoveLeft),
            (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(Message::MoveRight),
            (KeyCode::Char('n'), _) | (KeyCode::PageDown, _) => Some(Message::NextPage),
            (KeyCode::Char('p'), _) | (KeyCode::PageUp, _) => Some(Message::PrevPage),
            (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(Message::FirstPage),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(Message::LastPage),
            (KeyCode::Char('s'), _) => Some(Message::SortCurrentColumn),
            (KeyCode::Char('S'), _) => Some(Message::SortCurrentColumnDescending),
            (KeyCode::Char('f'), _) => Some(Message::FilterMenu),
            (KeyCode::Char('X'), _) => Some(Message::ClearFilters),
            (KeyCode::Char('c'), _) => Some(Message::ColumnMenu),
            (KeyCode::Char('H'), _) => Some(Message::HideAllColumns),
            (KeyCode::Char('A'), _) => Some(Message::ShowAllColumns),
            (KeyCode::Char('v'), _) => Some(Message::ShowDetail),
            (KeyCode::Char('e'), _) => Some(Message::Edit),
            (KeyCode::Char('d'), _) => Some(Message::Delete),
            (KeyCode::Char('?'), _) => Some(Message::Help),
            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => Some(Message::Enter),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}
