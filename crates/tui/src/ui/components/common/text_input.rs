//! UTF-8 safe single-line text buffer with a cursor.
//!
//! Suggestion fields keep their draft in one of these so keystrokes can be
//! applied at the cursor before the text is pushed to the controller.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display columns between the start of the text and the cursor.
    pub fn cursor_columns(&self) -> usize {
        self.input[..self.cursor].width()
    }

    /// Replaces the text, clamping the cursor back onto a char boundary.
    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.set_cursor(self.cursor);
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.input.len());
        while !self.input.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if let Some(previous) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= previous.len_utf8();
        }
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if let Some(previous) = self.input[..self.cursor].chars().next_back() {
            let start = self.cursor - previous.len_utf8();
            self.input.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    /// Remove the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            let end = self.cursor + next.len_utf8();
            self.input.drain(self.cursor..end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::new();
        st.set_input("h🙂llo");
        st.set_cursor(1);
        st.insert_char('e');
        assert_eq!(st.input(), "he🙂llo");
        st.move_right();
        st.backspace();
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn cursor_is_clamped_to_char_boundaries() {
        let mut st = TextInputState::new();
        st.set_input("麦当劳");
        st.set_cursor(4);
        assert_eq!(st.cursor(), 3);
        st.set_cursor(100);
        assert_eq!(st.cursor(), "麦当劳".len());
        assert_eq!(st.cursor_columns(), 6);
    }

    #[test]
    fn home_end_and_delete() {
        let mut st = TextInputState::new();
        st.set_input("chips");
        st.move_home();
        st.delete();
        assert_eq!(st.input(), "hips");
        st.move_end();
        st.delete();
        assert_eq!(st.input(), "hips");
        st.insert_char('!');
        assert_eq!(st.input(), "hips!");
        st.clear();
        assert_eq!((st.input(), st.cursor()), ("", 0));
    }
}
