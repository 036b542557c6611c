//! Motion algorithms for the normal-mode subset.
//!
//! Every method returns an "advanced" flag: `false` means the motion hit a
//! boundary (column 0, end of buffer, no match) so a counted repeat must
//! stop. Word-edge motions may still reposition the cursor while reporting
//! not-advanced - `w` at the end of the buffer rests on the last character.

use crate::engine::buffer::{Buffer, Cursor, is_blank, is_word_char};

const BRACKET_PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

fn is_bracket(c: char) -> bool {
    BRACKET_PAIRS.iter().any(|&(open, close)| c == open || c == close)
}

impl Buffer {
    pub fn move_left(&mut self) -> bool {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            true
        } else {
            false
        }
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor.col < self.last_col(self.cursor.row) {
            self.cursor.col += 1;
            true
        } else {
            false
        }
    }

    pub fn move_up(&mut self) -> bool {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.clamp_cursor_column();
            true
        } else {
            false
        }
    }

    pub fn move_down(&mut self) -> bool {
        if self.cursor.row + 1 < self.line_count() {
            self.cursor.row += 1;
            self.clamp_cursor_column();
            true
        } else {
            false
        }
    }

    pub fn move_line_start(&mut self) -> bool {
        let moved = self.cursor.col != 0;
        self.cursor.col = 0;
        moved
    }

    pub fn move_line_end(&mut self) -> bool {
        let target = self.last_col(self.cursor.row);
        let moved = self.cursor.col != target;
        self.cursor.col = target;
        moved
    }

    /// `w` - start of the next word, crossing line boundaries and skipping
    /// wholly blank lines.
    pub fn move_word_forward(&mut self) -> bool {
        let mut row = self.cursor.row;
        let mut col = self.cursor.col;
        let chars = self.line_chars(row);

        // Leave the rest of the current word behind.
        while col < chars.len() && is_word_char(chars[col]) {
            col += 1;
        }

        loop {
            let chars = self.line_chars(row);
            while col < chars.len() && !is_word_char(chars[col]) {
                col += 1;
            }
            if col < chars.len() {
                self.cursor = Cursor::new(row, col);
                return true;
            }
            if row + 1 < self.line_count() {
                row += 1;
                col = 0;
            } else {
                // End of buffer: rest on the last character and stop repeats.
                self.cursor = Cursor::new(row, self.last_col(row));
                return false;
            }
        }
    }

    /// `b` - start of the previous word, crossing line boundaries backward.
    pub fn move_word_backward(&mut self) -> bool {
        if self.cursor.row == 0 && self.cursor.col == 0 {
            return false;
        }
        let mut row = self.cursor.row;
        let mut col = self.cursor.col;

        // Step off the current position, wrapping to the previous line end.
        if col > 0 {
            col -= 1;
        } else {
            row -= 1;
            col = self.last_col(row);
        }

        loop {
            let chars = self.line_chars(row);
            while col > 0 && (col >= chars.len() || !is_word_char(chars[col])) {
                col -= 1;
            }
            if col < chars.len() && is_word_char(chars[col]) {
                while col > 0 && is_word_char(chars[col - 1]) {
                    col -= 1;
                }
                self.cursor = Cursor::new(row, col);
                return true;
            }
            if row == 0 {
                // Start of buffer with no word before the cursor.
                self.cursor = Cursor::new(0, 0);
                return false;
            }
            row -= 1;
            col = self.last_col(row);
        }
    }

    /// `e` - end of the current word, or of the next one when already at a
    /// word end or on whitespace.
    pub fn move_word_end(&mut self) -> bool {
        let mut row = self.cursor.row;
        let mut col = self.cursor.col;
        let chars = self.line_chars(row);

        // Inside a word with more of it to the right: its end is the target.
        if col + 1 < chars.len() && is_word_char(chars[col]) && is_word_char(chars[col + 1]) {
            while col + 1 < chars.len() && is_word_char(chars[col + 1]) {
                col += 1;
            }
            self.cursor = Cursor::new(row, col);
            return true;
        }

        col += 1;
        loop {
            let chars = self.line_chars(row);
            while col < chars.len() && !is_word_char(chars[col]) {
                col += 1;
            }
            if col < chars.len() {
                while col + 1 < chars.len() && is_word_char(chars[col + 1]) {
                    col += 1;
                }
                self.cursor = Cursor::new(row, col);
                return true;
            }
            if row + 1 < self.line_count() {
                row += 1;
                col = 0;
            } else {
                self.cursor = Cursor::new(row, self.last_col(row));
                return false;
            }
        }
    }

    /// `{` - first line of the previous paragraph (or line 0).
    pub fn move_paragraph_backward(&mut self) -> bool {
        let start = self.cursor;
        let mut row = start.row;
        if row > 0 {
            row -= 1;
        }
        while row > 0 && is_blank(&self.lines[row]) {
            row -= 1;
        }
        while row > 0 && !is_blank(&self.lines[row - 1]) {
            row -= 1;
        }
        self.cursor = Cursor::new(row, 0);
        self.cursor != start
    }

    /// `}` - first line of the next paragraph (or the last line).
    pub fn move_paragraph_forward(&mut self) -> bool {
        let start = self.cursor;
        let mut row = start.row;
        let last = self.line_count() - 1;
        while row < last && !is_blank(&self.lines[row]) {
            row += 1;
        }
        while row < last && is_blank(&self.lines[row]) {
            row += 1;
        }
        self.cursor = Cursor::new(row, 0);
        self.cursor != start
    }

    /// `G` / `gg` target. Clamps to the last line, column resets to 0.
    pub fn move_to_line(&mut self, row: usize) -> bool {
        let start = self.cursor;
        self.cursor = Cursor::new(row.min(self.line_count().saturating_sub(1)), 0);
        self.cursor != start
    }

    /// `%` - jump to the matching bracket. When the cursor is not on a
    /// bracket the current line is scanned forward for one to anchor on;
    /// no bracket, or no balanced partner anywhere in the buffer, is a no-op.
    pub fn match_bracket(&mut self) -> bool {
        let start = self.cursor;
        let Some((row, col, anchor)) = self.bracket_anchor() else {
            return false;
        };
        let Some(&(open, close)) = BRACKET_PAIRS
            .iter()
            .find(|&&(o, c)| o == anchor || c == anchor)
        else {
            return false;
        };

        let found = if anchor == open {
            self.scan_bracket_forward(open, close, row, col)
        } else {
            self.scan_bracket_backward(open, close, row, col)
        };
        match found {
            Some(target) => {
                self.cursor = target;
                self.cursor != start
            }
            None => false,
        }
    }

    fn bracket_anchor(&self) -> Option<(usize, usize, char)> {
        let chars = self.line_chars(self.cursor.row);
        chars
            .iter()
            .enumerate()
            .skip(self.cursor.col)
            .find(|&(_, &c)| is_bracket(c))
            .map(|(i, &c)| (self.cursor.row, i, c))
    }

    fn scan_bracket_forward(&self, open: char, close: char, row: usize, col: usize) -> Option<Cursor> {
        let mut balance = 0usize;
        let mut start_col = col;
        for r in row..self.line_count() {
            for (c, ch) in self.line_chars(r).iter().enumerate().skip(start_col) {
                if *ch == open {
                    balance += 1;
                } else if *ch == close {
                    balance -= 1;
                    if balance == 0 {
                        return Some(Cursor::new(r, c));
                    }
                }
            }
            start_col = 0;
        }
        None
    }

    fn scan_bracket_backward(&self, open: char, close: char, row: usize, col: usize) -> Option<Cursor> {
        let mut balance = 0usize;
        for r in (0..=row).rev() {
            let chars = self.line_chars(r);
            let from = if r == row { col } else { chars.len().saturating_sub(1) };
            if chars.is_empty() {
                continue;
            }
            for c in (0..=from.min(chars.len() - 1)).rev() {
                let ch = chars[c];
                if ch == close {
                    balance += 1;
                } else if ch == open {
                    balance -= 1;
                    if balance == 0 {
                        return Some(Cursor::new(r, c));
                    }
                }
            }
        }
        None
    }

    /// `f`/`F`/`t`/`T` with a cumulative count: each repetition continues
    /// from the previously found occurrence. Failure at any step, or a
    /// till-landing that would not move the cursor, fails the whole command
    /// and leaves the cursor in place.
    pub fn find_char(&mut self, target: char, forward: bool, till: bool, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        let chars = self.line_chars(self.cursor.row);
        let mut pos = self.cursor.col;
        for _ in 0..count {
            let found = if forward {
                chars
                    .iter()
                    .enumerate()
                    .skip(pos + 1)
                    .find(|&(_, &c)| c == target)
                    .map(|(i, _)| i)
            } else {
                chars[..pos.min(chars.len())].iter().rposition(|&c| c == target)
            };
            match found {
                Some(i) => pos = i,
                None => return false,
            }
        }
        let landing = if !till {
            pos
        } else if forward {
            match pos.checked_sub(1) {
                Some(l) => l,
                None => return false,
            }
        } else {
            pos + 1
        };
        if landing == self.cursor.col {
            return false;
        }
        self.cursor.col = landing;
        true
    }
}
