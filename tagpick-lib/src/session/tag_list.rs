use crate::version::TagItem;

const DEFAULT_PAGE_SIZE: usize = 10;

/// Ranked tags with a highlight cursor.
#[derive(Debug, Clone)]
pub struct TagList {
    items: Vec<TagItem>,
    cursor: usize,
    page_size: usize,
}

impl Default for TagList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TagList {
    pub fn items(&self) -> &[TagItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> Option<&TagItem> {
        self.items.get(self.cursor)
    }

    pub fn position(&self, raw: &str) -> Option<usize> {
        self.items.iter().position(|item| item.raw == raw)
    }

    /// Replaces the items and highlights `index` (clamped).
    pub fn set_items(&mut self, items: Vec<TagItem>, index: usize) {
        self.items = items;
        self.cursor = index.min(self.items.len().saturating_sub(1));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size);
    }

    pub fn page_down(&mut self) {
        let max_cursor = self.items.len().saturating_sub(1);
        self.cursor = (self.cursor + self.page_size).min(max_cursor);
    }

    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.cursor = self.items.len().saturating_sub(1);
    }
}
