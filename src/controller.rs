use std::time::Duration;
use tracing::trace;

use crate::domain::{CVError, Message, ViewConfig};
use crate::model::Model;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &ViewConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, CVError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(key, model.raw_keyevents()));
        }
        Ok(None)
    }

    /// Maps a key press to a message. While the search box is being edited,
    /// keys are passed on unmapped.
    pub fn handle_key(&self, key: event::KeyEvent, raw: bool) -> Option<Message> {
        if raw {
            return Some(Message::RawKey(key));
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Message::Quit),
                _ => None,
            };
        }
        let message = match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::MoveUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Message::MoveLeft),
            KeyCode::Char('l') | KeyCode::Right => Some(Message::MoveRight),
            KeyCode::Char('n') | KeyCode::PageDown => Some(Message::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => Some(Message::PreviousPage),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::FirstPage),
            KeyCode::Char('G') | KeyCode::End => Some(Message::LastPage),
            KeyCode::Char('s') => Some(Message::ToggleSort),
            KeyCode::Char('x') => Some(Message::ClearSort),
            KeyCode::Char('/') => Some(Message::Search),
            KeyCode::Char('c') => Some(Message::CopyCell),
            KeyCode::Char('y') => Some(Message::CopyRow),
            KeyCode::Char('?') => Some(Message::Help),
            KeyCode::Esc => Some(Message::Exit),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn controller() -> Controller {
        Controller::new(&ViewConfig::default())
    }

    #[test]
    fn maps_navigation_keys() {
        let c = controller();
        let press = |code| c.handle_key(KeyEvent::new(code, KeyModifiers::NONE), false);
        assert_eq!(press(KeyCode::Char('q')), Some(Message::Quit));
        assert_eq!(press(KeyCode::PageDown), Some(Message::NextPage));
        assert_eq!(press(KeyCode::Char('p')), Some(Message::PreviousPage));
        assert_eq!(press(KeyCode::Home), Some(Message::FirstPage));
        assert_eq!(press(KeyCode::End), Some(Message::LastPage));
        assert_eq!(press(KeyCode::Char('/')), Some(Message::Search));
        assert_eq!(press(KeyCode::Char('s')), Some(Message::ToggleSort));
        assert_eq!(press(KeyCode::F(5)), None);
    }

    #[test]
    fn raw_mode_passes_keys_through() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(controller().handle_key(key, true), Some(Message::RawKey(key)));
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(controller().handle_key(key, false), Some(Message::Quit));
    }
}
