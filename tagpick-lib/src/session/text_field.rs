use std::borrow::Cow;

const MASK_CHAR: char = '•';

/// Single-line editable text with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    buffer: String,
    /// Cursor position (character index, not byte)
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field whose contents are never shown, e.g. an access token.
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.buffer = text.into();
        self.cursor = self.buffer.chars().count();
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Trimmed contents, or `None` when the field is blank.
    pub fn value(&self) -> Option<&str> {
        let value = self.buffer.trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Contents as they may appear on screen.
    pub fn display(&self) -> Cow<'_, str> {
        if self.masked {
            Cow::Owned(MASK_CHAR.to_string().repeat(self.buffer.chars().count()))
        } else {
            Cow::Borrowed(&self.buffer)
        }
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.byte_index();
            self.buffer.remove(byte_idx);
        }
    }

    pub fn delete(&mut self) {
        let byte_idx = self.byte_index();
        if byte_idx < self.buffer.len() {
            self.buffer.remove(byte_idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }
}
