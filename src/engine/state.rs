use crate::engine::key::{Finder, Operator};

/// Sequence the engine is waiting to complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    #[default]
    None,
    Operator(Operator),
    Finder(Finder),
}

/// Last successful find/till command, kept for `;` and `,`.
/// Persists across unrelated commands until overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastFind {
    pub kind: Finder,
    pub target: char,
    pub forward: bool,
}

/// Cross-keystroke memory for one editing session.
///
/// Created once per session and reset whenever a lesson restarts. The
/// interpreter is the only writer; a call that fails or is cancelled leaves
/// this in the neutral form, never partially pending.
#[derive(Debug, Default)]
pub struct EngineState {
    /// Digit-string count accumulator, empty when no count is pending.
    /// A lone "0" never lands here - that is the line-start motion.
    active_count: String,
    pending: Pending,
    /// A dangling `g` waiting for a second `g`.
    goto_prefix: bool,
    last_find: Option<LastFind>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything back to neutral. The last find command survives a
    /// reset only conceptually in vim; here a lesson restart drops it too.
    pub fn reset(&mut self) {
        self.active_count.clear();
        self.pending = Pending::None;
        self.goto_prefix = false;
        self.last_find = None;
    }

    /// Clear the in-flight sequence but keep the find memory.
    pub fn cancel_sequence(&mut self) {
        self.active_count.clear();
        self.pending = Pending::None;
        self.goto_prefix = false;
    }

    pub fn pending(&self) -> Pending {
        self.pending
    }

    pub fn set_pending(&mut self, pending: Pending) {
        self.pending = pending;
    }

    pub fn is_waiting_for_second_key(&self) -> bool {
        self.pending != Pending::None || self.goto_prefix
    }

    pub fn goto_prefix(&self) -> bool {
        self.goto_prefix
    }

    pub fn set_goto_prefix(&mut self, value: bool) {
        self.goto_prefix = value;
    }

    pub fn has_count(&self) -> bool {
        !self.active_count.is_empty()
    }

    pub fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit < 10);
        // Guard against a runaway accumulator; counts beyond this are
        // clamped to the buffer anyway.
        if self.active_count.len() < 9 {
            self.active_count.push(char::from(b'0' + digit));
        }
    }

    /// Consume the accumulated count, if any.
    pub fn take_count(&mut self) -> Option<usize> {
        if self.active_count.is_empty() {
            return None;
        }
        let count = self.active_count.parse().unwrap_or(usize::MAX);
        self.active_count.clear();
        Some(count)
    }

    pub fn last_find(&self) -> Option<LastFind> {
        self.last_find
    }

    pub fn set_last_find(&mut self, last: LastFind) {
        self.last_find = Some(last);
    }

    /// Count + pending keys, for the harness status bar.
    pub fn pending_display(&self) -> String {
        let mut display = self.active_count.clone();
        match self.pending {
            Pending::None => {}
            Pending::Operator(op) => display.push(op.as_char()),
            Pending::Finder(finder) => display.push(finder.as_char()),
        }
        if self.goto_prefix {
            display.push('g');
        }
        display
    }
}
