// src/text_field.rs
// Single-line input field with a hard length limit, used for the seed and
// color inputs of the terminal client.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    chars: Vec<char>,
    caret: usize,
    max_len: usize,
}

impl TextField {
    pub fn new(max_len: usize) -> Self {
        TextField {
            chars: Vec::new(),
            caret: 0,
            max_len,
        }
    }

    pub fn with_text(text: &str, max_len: usize) -> Self {
        let mut field = Self::new(max_len);
        field.set_text(text);
        field
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    // Replace the content, caret goes to the end
    pub fn set_text(&mut self, text: &str) {
        self.chars = text.chars().take(self.max_len).collect();
        self.caret = self.chars.len();
    }

    /// Type one character at the caret. Text beyond the limit is cut off and
    /// the caret stays where typing left it, clamped to the new length.
    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.caret, c);
        self.caret += 1;
        if self.chars.len() > self.max_len {
            self.chars.truncate(self.max_len);
            self.caret = self.caret.min(self.max_len);
        }
    }

    pub fn backspace(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
            self.chars.remove(self.caret);
        }
    }

    pub fn delete(&mut self) {
        if self.caret < self.chars.len() {
            self.chars.remove(self.caret);
        }
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.chars.len());
    }

    pub fn home(&mut self) {
        self.caret = 0;
    }

    pub fn end(&mut self) {
        self.caret = self.chars.len();
    }
}
