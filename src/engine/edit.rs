//! Buffer-mutating commands: `x`, `dd` and the simplified `dw`.

use crate::engine::buffer::{Buffer, Cursor};

impl Buffer {
    /// `x` - delete the character under the cursor. The cursor stays put
    /// unless it deleted the last character of the line, in which case it
    /// slides left. An empty line is a no-op.
    pub fn delete_char(&mut self) -> bool {
        let mut chars = self.line_chars(self.cursor.row);
        if self.cursor.col >= chars.len() {
            return false;
        }
        chars.remove(self.cursor.col);
        self.lines[self.cursor.row] = chars.into_iter().collect();
        self.clamp_cursor_column();
        true
    }

    /// `dd` - delete `count` whole lines starting at the cursor row.
    /// A count of the whole buffer or more empties it regardless of where
    /// the cursor sits.
    pub fn delete_lines(&mut self, count: usize) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        let count = count.max(1);
        if count >= self.lines.len() {
            self.lines.clear();
            self.cursor = Cursor::default();
            return true;
        }
        let row = self.cursor.row;
        let end = (row + count).min(self.lines.len());
        self.lines.drain(row..end);
        self.cursor = Cursor::new(row.min(self.lines.len() - 1), 0);
        true
    }

    /// Simplified `dw`: truncate from the cursor column to the end of the
    /// line. A line emptied this way is removed unless it is the sole or
    /// last line of the buffer.
    pub fn delete_word_simple(&mut self) -> bool {
        let row = self.cursor.row;
        let chars = self.line_chars(row);
        if self.cursor.col >= chars.len() {
            return false;
        }
        self.lines[row] = chars[..self.cursor.col].iter().collect();
        if self.lines[row].is_empty() && self.lines.len() > 1 && row != self.lines.len() - 1 {
            self.lines.remove(row);
        }
        self.clamp_cursor();
        true
    }
}
