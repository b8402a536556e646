//! Single-line text buffer with a character-indexed caret.

use solchat_core::InputSnapshot;

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
    /// Caret position in characters.
    caret: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Text before the caret, for cursor placement.
    pub fn before_caret(&self) -> &str {
        &self.buffer[..self.byte_offset(self.caret)]
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::new(self.buffer.clone(), self.caret)
    }

    /// Replace the whole line, e.g. after a completion.
    pub fn set(&mut self, text: impl Into<String>, caret: usize) {
        self.buffer = text.into();
        self.caret = caret.min(self.len());
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.caret = 0;
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.caret);
        self.buffer.insert(at, ch);
        self.caret += 1;
    }

    /// Insert pasted text. Line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) {
        let cleaned: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let at = self.byte_offset(self.caret);
        self.buffer.insert_str(at, &cleaned);
        self.caret += cleaned.chars().count();
    }

    /// Delete the character before the caret. Returns whether text changed.
    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let at = self.byte_offset(self.caret - 1);
        self.buffer.remove(at);
        self.caret -= 1;
        true
    }

    /// Delete the character under the caret. Returns whether text changed.
    pub fn delete(&mut self) -> bool {
        if self.caret >= self.len() {
            return false;
        }
        let at = self.byte_offset(self.caret);
        self.buffer.remove(at);
        true
    }

    /// Move the caret; each returns whether it moved.
    pub fn left(&mut self) -> bool {
        self.move_to(self.caret.saturating_sub(1))
    }

    pub fn right(&mut self) -> bool {
        self.move_to((self.caret + 1).min(self.len()))
    }

    pub fn home(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn end(&mut self) -> bool {
        self.move_to(self.len())
    }

    fn move_to(&mut self, caret: usize) -> bool {
        let moved = caret != self.caret;
        self.caret = caret;
        moved
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}
