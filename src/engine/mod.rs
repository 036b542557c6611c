//! Command-interpretation engine: a stateful key-sequence parser over a
//! library of normal-mode motion and edit algorithms.
//!
//! One `Engine` per editing session. The harness forwards each keystroke
//! with the current buffer snapshot; the engine never mutates the caller's
//! buffer and never returns an error - all failure is the `completed` flag.

pub mod buffer;
mod edit;
pub mod key;
mod motion;
pub mod state;

pub use buffer::{Buffer, Cursor, is_blank, is_word_char};
pub use key::{Finder, KeyToken, Motion, Operator, classify};
pub use state::{EngineState, LastFind, Pending};

use tracing::{debug, trace};

/// Result of one keystroke: the (possibly new) buffer snapshot and whether
/// a command fully executed. `completed=false` means nothing visible
/// changed - a sequence is still accumulating or the key was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub lines: Vec<String>,
    pub cursor: Cursor,
    pub completed: bool,
}

/// The command interpreter plus its session state.
#[derive(Debug, Default)]
pub struct Engine {
    state: EngineState,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            state: EngineState::new(),
        }
    }

    /// Clear all pending state; the harness calls this on lesson restart.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// True while an operator/finder/`g` sequence awaits its next key.
    /// The harness suppresses conflicting global shortcuts while set.
    pub fn is_waiting_for_second_key(&self) -> bool {
        self.state.is_waiting_for_second_key()
    }

    /// Count + pending keys for the status bar.
    pub fn pending_display(&self) -> String {
        self.state.pending_display()
    }

    pub fn last_find(&self) -> Option<LastFind> {
        self.state.last_find()
    }

    /// Interpret one keystroke against a buffer snapshot.
    pub fn interpret(&mut self, key: &str, lines: &[String], cursor: Cursor) -> Interpretation {
        // An empty buffer has nothing for this command subset to act on.
        // Escape still cancels whatever was pending.
        if lines.is_empty() {
            if key == key::ESCAPE {
                self.state.cancel_sequence();
            }
            return Interpretation {
                lines: Vec::new(),
                cursor: Cursor::default(),
                completed: false,
            };
        }

        let buffer = Buffer::new(lines, cursor);
        let token = key::classify(key);
        trace!(?token, key, "interpreting key");

        if token == KeyToken::Escape {
            self.state.cancel_sequence();
            return Self::unchanged(buffer);
        }

        // 1. A pending operator/finder claims the key as its second part.
        match self.state.pending() {
            Pending::Operator(op) => return self.continue_operator(op, key, buffer),
            Pending::Finder(finder) => return self.continue_finder(finder, key, buffer),
            Pending::None => {}
        }

        // A dangling `g` completes on a second `g`; any other key drops the
        // prefix and is then processed on its own.
        if self.state.goto_prefix() {
            self.state.set_goto_prefix(false);
            if token == KeyToken::GotoPrefix {
                return self.execute_motion(Motion::GotoLineFirst, buffer);
            }
            trace!(key, "dangling g cancelled");
        }

        // 2. Digit accumulation. A lone 0 is the line-start motion.
        if let KeyToken::Digit(digit) = token {
            if digit == 0 && !self.state.has_count() {
                return self.execute_motion(Motion::LineStart, buffer);
            }
            self.state.push_digit(digit);
            return Self::unchanged(buffer);
        }

        // 3. Sequence starters keep the accumulated count for the
        // composed command.
        match token {
            KeyToken::Operator(op) => {
                self.state.set_pending(Pending::Operator(op));
                return Self::unchanged(buffer);
            }
            KeyToken::Finder(finder) => {
                self.state.set_pending(Pending::Finder(finder));
                return Self::unchanged(buffer);
            }
            KeyToken::GotoPrefix => {
                self.state.set_goto_prefix(true);
                return Self::unchanged(buffer);
            }
            _ => {}
        }

        // 4. Standalone motion or edit.
        match token {
            KeyToken::Motion(motion) => self.execute_motion(motion, buffer),
            KeyToken::Edit(edit) => self.execute_edit(edit, buffer),
            _ => {
                debug!(key, "unrecognized key ignored");
                self.state.cancel_sequence();
                Self::unchanged(buffer)
            }
        }
    }

    fn unchanged(buffer: Buffer) -> Interpretation {
        Interpretation {
            lines: buffer.lines,
            cursor: buffer.cursor,
            completed: false,
        }
    }

    fn execute_motion(&mut self, motion: Motion, mut buffer: Buffer) -> Interpretation {
        let origin = buffer.cursor;
        let count = self.state.take_count();
        let completed = match motion {
            Motion::GotoLine => {
                let row = count
                    .map(|n| n.saturating_sub(1))
                    .unwrap_or(buffer.line_count().saturating_sub(1));
                buffer.move_to_line(row)
            }
            Motion::GotoLineFirst => {
                let row = count.map(|n| n.saturating_sub(1)).unwrap_or(0);
                buffer.move_to_line(row)
            }
            Motion::RepeatFind | Motion::RepeatFindReverse => match self.state.last_find() {
                Some(last) => {
                    let forward = if motion == Motion::RepeatFind {
                        last.forward
                    } else {
                        !last.forward
                    };
                    buffer.find_char(last.target, forward, last.kind.till(), count.unwrap_or(1))
                }
                None => false,
            },
            _ => {
                let reps = if motion.repeatable() {
                    count.unwrap_or(1)
                } else {
                    1
                };
                for _ in 0..reps {
                    if !Self::apply_motion(motion, &mut buffer) {
                        break;
                    }
                }
                buffer.cursor != origin
            }
        };
        Interpretation {
            lines: buffer.lines,
            cursor: buffer.cursor,
            completed,
        }
    }

    fn apply_motion(motion: Motion, buffer: &mut Buffer) -> bool {
        match motion {
            Motion::Left => buffer.move_left(),
            Motion::Right => buffer.move_right(),
            Motion::Up => buffer.move_up(),
            Motion::Down => buffer.move_down(),
            Motion::LineStart => buffer.move_line_start(),
            Motion::LineEnd => buffer.move_line_end(),
            Motion::WordForward => buffer.move_word_forward(),
            Motion::WordBackward => buffer.move_word_backward(),
            Motion::WordEnd => buffer.move_word_end(),
            Motion::ParagraphBackward => buffer.move_paragraph_backward(),
            Motion::ParagraphForward => buffer.move_paragraph_forward(),
            Motion::MatchBracket => buffer.match_bracket(),
            // Handled before the repeat loop.
            Motion::GotoLine
            | Motion::GotoLineFirst
            | Motion::RepeatFind
            | Motion::RepeatFindReverse => false,
        }
    }

    fn execute_edit(&mut self, edit: key::Edit, mut buffer: Buffer) -> Interpretation {
        let count = self.state.take_count().unwrap_or(1);
        let completed = match edit {
            key::Edit::DeleteChar => {
                let mut deleted = false;
                for _ in 0..count {
                    if !buffer.delete_char() {
                        break;
                    }
                    deleted = true;
                }
                deleted
            }
        };
        Interpretation {
            lines: buffer.lines,
            cursor: buffer.cursor,
            completed,
        }
    }

    fn continue_operator(&mut self, op: Operator, key: &str, mut buffer: Buffer) -> Interpretation {
        let count = self.state.take_count().unwrap_or(1);
        self.state.set_pending(Pending::None);
        let completed = match (op, key::classify(key)) {
            (Operator::Delete, KeyToken::Operator(Operator::Delete)) => buffer.delete_lines(count),
            (Operator::Delete, KeyToken::Motion(Motion::WordForward)) => buffer.delete_word_simple(),
            (_, token) => {
                // Accepted syntactically so the second key never leaks into
                // normal dispatch, but the composition is not implemented.
                debug!(op = %op.as_char(), key, ?token, "operator continuation absorbed");
                false
            }
        };
        Interpretation {
            lines: buffer.lines,
            cursor: buffer.cursor,
            completed,
        }
    }

    fn continue_finder(&mut self, finder: Finder, key: &str, mut buffer: Buffer) -> Interpretation {
        let count = self.state.take_count().unwrap_or(1);
        self.state.set_pending(Pending::None);
        let mut chars = key.chars();
        let (Some(target), None) = (chars.next(), chars.next()) else {
            debug!(key, "finder target must be a single character");
            return Self::unchanged(buffer);
        };
        let completed = buffer.find_char(target, finder.forward(), finder.till(), count);
        if completed {
            self.state.set_last_find(LastFind {
                kind: finder,
                target,
                forward: finder.forward(),
            });
        }
        Interpretation {
            lines: buffer.lines,
            cursor: buffer.cursor,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    /// Feed a key sequence through a fresh engine, returning the final state.
    fn run(keys: &[&str], texts: &[&str], cursor: Cursor) -> (Engine, Vec<String>, Cursor, bool) {
        let mut engine = Engine::new();
        let mut current = lines(texts);
        let mut cur = cursor;
        let mut completed = false;
        for key in keys {
            let result = engine.interpret(key, &current, cur);
            completed = result.completed;
            if result.completed {
                current = result.lines;
                cur = result.cursor;
            }
        }
        (engine, current, cur, completed)
    }

    #[test]
    fn test_dollar_moves_to_line_end() {
        let (_, _, cursor, completed) = run(&["$"], &["Hello World"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 10));
    }

    #[test]
    fn test_word_twice() {
        let (_, _, cursor, _) = run(&["w"], &["foo bar baz"], Cursor::new(0, 0));
        assert_eq!(cursor, Cursor::new(0, 4));
        let (_, _, cursor, _) = run(&["w", "w"], &["foo bar baz"], Cursor::new(0, 0));
        assert_eq!(cursor, Cursor::new(0, 8));
    }

    #[test]
    fn test_dd_deletes_line() {
        let (_, buf, cursor, completed) =
            run(&["d", "d"], &["line1", "line2", "line3"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(buf, lines(&["line2", "line3"]));
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_counted_dd() {
        let (_, buf, cursor, completed) =
            run(&["2", "d", "d"], &["a", "b", "c"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(buf, lines(&["c"]));
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_dd_everything_leaves_empty_buffer() {
        let (_, buf, cursor, completed) = run(&["9", "d", "d"], &["a", "b"], Cursor::new(1, 0));
        assert!(completed);
        assert!(buf.is_empty());
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_dw_truncates_line() {
        let (_, buf, cursor, completed) = run(&["d", "w"], &["keep this"], Cursor::new(0, 5));
        assert!(completed);
        assert_eq!(buf, lines(&["keep "]));
        assert_eq!(cursor, Cursor::new(0, 4));
    }

    #[test]
    fn test_find_then_repeat_fails_without_second_match() {
        let mut engine = Engine::new();
        let text = lines(&["abcXefg"]);
        let result = engine.interpret("f", &text, Cursor::new(0, 0));
        assert!(!result.completed);
        assert!(engine.is_waiting_for_second_key());

        let result = engine.interpret("X", &text, Cursor::new(0, 0));
        assert!(result.completed);
        assert_eq!(result.cursor, Cursor::new(0, 3));

        // No more X on the line: `;` is a no-op with the cursor unchanged.
        let result = engine.interpret(";", &text, result.cursor);
        assert!(!result.completed);
        assert_eq!(result.cursor, Cursor::new(0, 3));
    }

    #[test]
    fn test_semicolon_advances_to_next_occurrence() {
        let (_, _, cursor, completed) = run(&["f", "o", ";"], &["foo bond"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_comma_reverses_find_direction() {
        let (_, _, cursor, completed) =
            run(&["f", "o", ";", ","], &["ooo"], Cursor::new(0, 0));
        assert!(completed);
        // f o -> 1, ; -> 2, , -> back to 1
        assert_eq!(cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_repeat_find_without_history_is_noop() {
        let (_, _, cursor, completed) = run(&[";"], &["abc"], Cursor::new(0, 0));
        assert!(!completed);
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_counted_motion() {
        let (_, _, cursor, completed) = run(&["3", "l"], &["abcdef"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 3));
    }

    #[test]
    fn test_counted_motion_stops_at_boundary() {
        let (_, _, cursor, completed) = run(&["9", "l"], &["abc"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_motion_at_boundary_not_completed() {
        let (_, _, cursor, completed) = run(&["h"], &["abc"], Cursor::new(0, 0));
        assert!(!completed);
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_zero_is_line_start_without_count() {
        let (_, _, cursor, completed) = run(&["0"], &["abcdef"], Cursor::new(0, 4));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_zero_extends_count() {
        // "10l" moves ten columns, it does not jump to the line start.
        let (_, _, cursor, completed) =
            run(&["1", "0", "l"], &["abcdefghijklmno"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 10));
    }

    #[test]
    fn test_uppercase_g_defaults_to_last_line() {
        let (_, _, cursor, completed) = run(&["G"], &["a", "b", "c"], Cursor::new(0, 1));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(2, 0));
    }

    #[test]
    fn test_counted_g_targets_line() {
        let (_, _, cursor, completed) = run(&["2", "G"], &["a", "b", "c"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(1, 0));
    }

    #[test]
    fn test_gg_via_prefix_and_literal() {
        let (_, _, cursor, completed) = run(&["g", "g"], &["a", "b", "c"], Cursor::new(2, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 0));

        let (_, _, cursor, completed) = run(&["gg"], &["a", "b", "c"], Cursor::new(2, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 0));

        let (_, _, cursor, completed) = run(&["3", "g", "g"], &["a", "b", "c", "d"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(2, 0));
    }

    #[test]
    fn test_dangling_g_does_not_leak() {
        let mut engine = Engine::new();
        let text = lines(&["abc"]);
        let result = engine.interpret("g", &text, Cursor::new(0, 0));
        assert!(!result.completed);
        assert!(engine.is_waiting_for_second_key());

        // The prefix is dropped and the following key runs on its own.
        let result = engine.interpret("l", &text, Cursor::new(0, 0));
        assert!(result.completed);
        assert_eq!(result.cursor, Cursor::new(0, 1));
        assert!(!engine.is_waiting_for_second_key());
    }

    #[test]
    fn test_escape_clears_pending_state() {
        let mut engine = Engine::new();
        let text = lines(&["abc"]);
        engine.interpret("4", &text, Cursor::new(0, 0));
        engine.interpret("d", &text, Cursor::new(0, 0));
        assert!(engine.is_waiting_for_second_key());
        assert_eq!(engine.pending_display(), "4d");

        let result = engine.interpret("Escape", &text, Cursor::new(0, 0));
        assert!(!result.completed);
        assert!(!engine.is_waiting_for_second_key());
        assert_eq!(engine.pending_display(), "");

        // The stale count is gone: the next motion moves a single column.
        let result = engine.interpret("l", &text, Cursor::new(0, 0));
        assert_eq!(result.cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_invalid_operator_continuation_absorbed() {
        let mut engine = Engine::new();
        let text = lines(&["abc", "def"]);
        engine.interpret("d", &text, Cursor::new(0, 0));
        let result = engine.interpret("j", &text, Cursor::new(0, 0));
        assert!(!result.completed);
        assert_eq!(result.lines, text);
        assert!(!engine.is_waiting_for_second_key());

        // The j did not leak into normal dispatch: cursor still on row 0.
        assert_eq!(result.cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_change_and_yank_absorb_second_key() {
        for op in ["c", "y"] {
            let mut engine = Engine::new();
            let text = lines(&["abc"]);
            engine.interpret(op, &text, Cursor::new(0, 0));
            assert!(engine.is_waiting_for_second_key());
            let result = engine.interpret("w", &text, Cursor::new(0, 0));
            assert!(!result.completed);
            assert_eq!(result.lines, text);
            assert!(!engine.is_waiting_for_second_key());
        }
    }

    #[test]
    fn test_counted_x() {
        let (_, buf, cursor, completed) = run(&["3", "x"], &["abcdef"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(buf, lines(&["def"]));
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_x_on_empty_line_not_completed() {
        let (_, buf, _, completed) = run(&["x"], &[""], Cursor::new(0, 0));
        assert!(!completed);
        assert_eq!(buf, lines(&[""]));
    }

    #[test]
    fn test_counted_finder() {
        let (_, _, cursor, completed) = run(&["2", "f", "o"], &["foo"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_failed_counted_finder_leaves_cursor() {
        let (_, _, cursor, completed) = run(&["5", "f", "o"], &["foo"], Cursor::new(0, 0));
        assert!(!completed);
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_till_updates_repeat_memory() {
        let (engine, _, cursor, completed) =
            run(&["t", "X"], &["abXcdX"], Cursor::new(0, 0));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 1));
        let last = engine.last_find().unwrap();
        assert_eq!(last.target, 'X');
        assert!(last.forward);
        assert_eq!(last.kind, Finder::Till);
    }

    #[test]
    fn test_operators_do_not_update_repeat_memory() {
        let (engine, _, _, _) = run(&["d", "d"], &["a", "b"], Cursor::new(0, 0));
        assert!(engine.last_find().is_none());
    }

    #[test]
    fn test_unknown_key_clears_count() {
        let mut engine = Engine::new();
        let text = lines(&["abcdef"]);
        engine.interpret("3", &text, Cursor::new(0, 0));
        let result = engine.interpret("q", &text, Cursor::new(0, 0));
        assert!(!result.completed);
        let result = engine.interpret("l", &text, Cursor::new(0, 0));
        assert_eq!(result.cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_empty_buffer_is_inert() {
        let mut engine = Engine::new();
        for key in ["h", "x", "d", "w", "$", "G"] {
            let result = engine.interpret(key, &[], Cursor::new(0, 0));
            assert!(!result.completed, "key {key:?} on empty buffer");
            assert!(result.lines.is_empty());
            assert_eq!(result.cursor, Cursor::new(0, 0));
        }
    }

    #[test]
    fn test_interpret_does_not_mutate_caller_buffer() {
        let mut engine = Engine::new();
        let text = lines(&["abc"]);
        let result = engine.interpret("x", &text, Cursor::new(0, 0));
        assert!(result.completed);
        assert_eq!(text, lines(&["abc"]));
        assert_eq!(result.lines, lines(&["bc"]));
    }

    #[test]
    fn test_cursor_invariants_hold_after_pure_motions() {
        let texts = ["abc def", "", "  x", "last"];
        for key in ["h", "j", "k", "l", "0", "$"] {
            for row in 0..texts.len() {
                for col in 0..8 {
                    let mut engine = Engine::new();
                    let result = engine.interpret(key, &lines(&texts), Cursor::new(row, col));
                    let line_len = result.lines[result.cursor.row].chars().count();
                    assert!(result.cursor.row < result.lines.len());
                    assert!(result.cursor.col <= line_len.saturating_sub(1));
                }
            }
        }
    }

    #[test]
    fn test_paragraph_keys() {
        let text = ["p1a", "p1b", "", "p2a", "p2b"];
        let (_, _, cursor, completed) = run(&["}"], &text, Cursor::new(0, 2));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(3, 0));
        let (_, _, cursor, completed) = run(&["{"], &text, Cursor::new(4, 1));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(3, 0));
    }

    #[test]
    fn test_percent_jumps_to_match() {
        let (_, _, cursor, completed) = run(&["%"], &["a (b) c"], Cursor::new(0, 2));
        assert!(completed);
        assert_eq!(cursor, Cursor::new(0, 4));
    }
}
