use crate::engine::Cursor;
use crate::levels::Level;
use crossterm::{
    cursor as term_cursor, execute,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, size},
};
use std::io::{self, Write, stdout};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Clone)]
pub struct RenderParams<'a> {
    pub level: &'a Level,
    pub chapter_title: &'a str,
    pub lines: &'a [String],
    pub cursor: Cursor,
    /// In-flight count and prefix keys, shown bottom-right like vim's showcmd.
    pub pending: &'a str,
    pub passed: bool,
    pub status_message: &'a str,
    pub player_name: &'a str,
    pub completed: usize,
    pub total: usize,
    pub xp: u32,
    pub streak: u32,
}

/// Draws the whole practice screen each frame. The buffers here are a few
/// lines long, so a full redraw is cheaper than tracking damage.
pub struct View {
    show_line_numbers: bool,
}

impl View {
    pub fn new(show_line_numbers: bool) -> Self {
        Self { show_line_numbers }
    }

    fn move_to(&self, row: usize, col: usize) -> io::Result<()> {
        execute!(stdout(), term_cursor::MoveTo(col as u16, row as u16))
    }

    pub fn render(&mut self, params: &RenderParams) -> io::Result<()> {
        let (width, height) = size()?;
        let width = width as usize;
        execute!(stdout(), Clear(ClearType::All))?;

        // Header: level identity and the keys worth practicing.
        self.move_to(0, 0)?;
        let header = format!(
            "vim-dojo  Level {}: {}  [{}]",
            params.level.id, params.level.title, params.chapter_title
        );
        print!("{}", clip(&header, width));
        if !params.level.keys.is_empty() {
            let keys = format!("keys: {}", params.level.keys.join(" "));
            let pad = width.saturating_sub(header.width() + keys.width());
            if pad > 1 {
                print!("{}{}", " ".repeat(pad), keys);
            }
        }

        self.move_to(1, 0)?;
        print!("{}", clip(&params.level.description, width));

        // Practice buffer with a software block cursor.
        let gutter = if self.show_line_numbers {
            params.lines.len().to_string().len() + 1
        } else {
            0
        };
        let text_row = 3;
        for (row, line) in params.lines.iter().enumerate() {
            self.move_to(text_row + row, 0)?;
            if self.show_line_numbers {
                print!("{:>width$} ", row + 1, width = gutter - 1);
            }
            if row == params.cursor.row {
                self.print_cursor_line(line, params.cursor.col, width.saturating_sub(gutter))?;
            } else {
                print!("{}", clip(line, width.saturating_sub(gutter)));
            }
        }
        if params.lines.is_empty() {
            // An emptied buffer still needs somewhere to show the cursor.
            self.move_to(text_row, gutter)?;
            self.print_cursor_line("", 0, width.saturating_sub(gutter))?;
        }

        // Hint and pass banner above the status line.
        let hint_row = (height as usize).saturating_sub(3);
        if !params.level.hint.is_empty() && !params.passed {
            self.move_to(hint_row, 0)?;
            print!("{}", clip(&format!("hint: {}", params.level.hint), width));
        }
        if params.passed {
            self.move_to(hint_row, 0)?;
            execute!(
                stdout(),
                SetForegroundColor(Color::Green),
            )?;
            print!(
                "{}",
                clip(
                    "Level complete! Press Enter for the next level (Ctrl+R to replay).",
                    width
                )
            );
            execute!(stdout(), ResetColor)?;
        } else if !params.status_message.is_empty() {
            self.move_to(hint_row.saturating_sub(1), 0)?;
            print!("{}", clip(params.status_message, width));
        }

        // Status line: progress on the left, showcmd and position on the right.
        let status_row = (height as usize).saturating_sub(1);
        self.move_to(status_row, 0)?;
        execute!(
            stdout(),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White)
        )?;
        let left = format!(
            " {}  {}/{} levels  {} xp  streak {}",
            params.player_name, params.completed, params.total, params.xp, params.streak
        );
        let right = format!(
            "{}  {}:{} ",
            params.pending,
            params.cursor.row + 1,
            params.cursor.col + 1
        );
        let pad = width.saturating_sub(left.width() + right.width());
        print!("{}{}{}", clip(&left, width), " ".repeat(pad), right);
        execute!(stdout(), ResetColor)?;

        stdout().flush()
    }

    /// Print a line with the cursor cell drawn in reverse colors. A cursor
    /// sitting past the last character gets a highlighted blank cell.
    fn print_cursor_line(&self, line: &str, col: usize, width: usize) -> io::Result<()> {
        let chars: Vec<char> = line.chars().collect();
        for (i, ch) in chars.iter().enumerate().take(width) {
            if i == col {
                execute!(
                    stdout(),
                    SetBackgroundColor(Color::White),
                    SetForegroundColor(Color::Black)
                )?;
                print!("{ch}");
                execute!(stdout(), ResetColor)?;
            } else {
                print!("{ch}");
            }
        }
        if col >= chars.len() && chars.len() < width {
            execute!(
                stdout(),
                SetBackgroundColor(Color::White),
                SetForegroundColor(Color::Black)
            )?;
            print!(" ");
            execute!(stdout(), ResetColor)?;
        }
        Ok(())
    }
}

/// Truncate to a display-column budget; wide characters count double.
fn clip(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
