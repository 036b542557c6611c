use serde::{Deserialize, Serialize};

/// Zero-indexed (row, column) cursor position.
///
/// The column normally rests ON a character; motions like `$` may leave it
/// at `line length` transiently before `clamp_cursor_column` pulls it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A line is blank when its trimmed content is empty.
/// Paragraph motions treat blank lines as boundaries.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Word motions split on whitespace only: any non-space character belongs
/// to a word. All of `w`, `b`, `e` go through this single predicate so the
/// boundary semantics cannot diverge between them.
pub fn is_word_char(c: char) -> bool {
    !c.is_whitespace()
}

/// Working copy of the text being edited. The interpreter clones the
/// caller's lines into one of these, applies motions and edits to it, and
/// hands the result back; the caller's buffer is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    pub lines: Vec<String>,
    pub cursor: Cursor,
}

impl Buffer {
    pub fn new(lines: &[String], cursor: Cursor) -> Self {
        let mut buffer = Self {
            lines: lines.to_vec(),
            cursor,
        };
        buffer.clamp_cursor();
        buffer
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Character count of the line at `row`, 0 for rows past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    /// Last valid cursor column on `row`: length - 1, or 0 for an empty line.
    pub fn last_col(&self, row: usize) -> usize {
        self.line_len(row).saturating_sub(1)
    }

    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.lines.get(row).and_then(|l| l.chars().nth(col))
    }

    pub fn line_chars(&self, row: usize) -> Vec<char> {
        self.lines.get(row).map_or_else(Vec::new, |l| l.chars().collect())
    }

    /// Pull the cursor back inside the buffer: row into `[0, line_count)`,
    /// column onto a character of the destination line.
    pub fn clamp_cursor(&mut self) {
        if self.lines.is_empty() {
            self.cursor = Cursor::default();
            return;
        }
        if self.cursor.row >= self.lines.len() {
            self.cursor.row = self.lines.len() - 1;
        }
        self.clamp_cursor_column();
    }

    pub fn clamp_cursor_column(&mut self) {
        let max = self.last_col(self.cursor.row);
        if self.cursor.col > max {
            self.cursor.col = max;
        }
    }
}
