use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};
use tracing::trace;

/// Single line text input. Every edit is reported back so the caller can
/// react per keystroke.
#[derive(Default)]
pub struct Inputter {
    current_input: String,
    cursor_pos: usize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputResult {
    pub input: String,
    pub finished: bool,
    pub canceled: bool,
    pub changed: bool,
    pub cursor_pos: usize,
}

impl Inputter {
    pub fn read(&mut self, key: event::KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => self.result(true, false, false),
            (KeyCode::Esc, _) => self.escape(),
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Left, _) => self.left(),
            (KeyCode::Right, _) => self.right(),
            (KeyCode::Home, _) => self.move_to(0),
            (KeyCode::End, _) => self.move_to(self.len()),
            (KeyCode::Char(chr), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.insert(chr),
            (kc, km) => {
                trace!("Ignoring input {kc:?} {km:?}");
                self.result(false, false, false)
            }
        }
    }

    /// Replace the content and put the cursor behind it.
    pub fn set(&mut self, s: &str) {
        self.current_input = s.to_string();
        self.cursor_pos = self.len();
    }

    pub fn get(&self) -> InputResult {
        self.result(false, false, false)
    }

    pub fn clear(&mut self) {
        self.current_input.clear();
        self.cursor_pos = 0;
    }

    fn len(&self) -> usize {
        self.current_input.chars().count()
    }

    fn result(&self, finished: bool, canceled: bool, changed: bool) -> InputResult {
        InputResult {
            input: self.current_input.clone(),
            finished,
            canceled,
            changed,
            cursor_pos: self.cursor_pos,
        }
    }

    fn escape(&mut self) -> InputResult {
        let changed = !self.current_input.is_empty();
        self.clear();
        self.result(true, true, changed)
    }

    fn backspace(&mut self) -> InputResult {
        if self.cursor_pos == 0 {
            return self.get();
        }
        self.cursor_pos -= 1;
        let idx = self.byte_pos();
        self.current_input.remove(idx);
        self.result(false, false, true)
    }

    fn delete(&mut self) -> InputResult {
        if self.cursor_pos >= self.len() {
            return self.get();
        }
        let idx = self.byte_pos();
        self.current_input.remove(idx);
        self.result(false, false, true)
    }

    fn left(&mut self) -> InputResult {
        self.move_to(self.cursor_pos.saturating_sub(1))
    }

    fn right(&mut self) -> InputResult {
        self.move_to(self.cursor_pos + 1)
    }

    fn move_to(&mut self, pos: usize) -> InputResult {
        self.cursor_pos = pos.min(self.len());
        self.get()
    }

    fn insert(&mut self, chr: char) -> InputResult {
        let idx = self.byte_pos();
        self.current_input.insert(idx, chr);
        self.cursor_pos += 1;
        self.result(false, false, true)
    }

    fn byte_pos(&self) -> usize {
        self.current_input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.current_input.len())
    }
}
