//! Lesson goal evaluation. Pure: same inputs, same answer, no mutation.

use crate::engine::Cursor;
use serde::{Deserialize, Serialize};

/// How a level decides it has been passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyKind {
    CursorAtStart,
    CursorAtEnd,
    TextEquals,
    CursorAtPos,
    /// Forward-compatibility: a kind this build does not know never passes.
    #[serde(other)]
    Unknown,
}

/// Verification descriptor supplied by the level catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDescriptor {
    pub verify: VerifyKind,
    #[serde(default)]
    pub goal_cursor: Option<Cursor>,
}

/// Check a lesson goal against the current buffer and cursor.
pub fn check_goal(
    descriptor: &GoalDescriptor,
    lines: &[String],
    cursor: Cursor,
    goal_lines: &[String],
) -> bool {
    match descriptor.verify {
        VerifyKind::CursorAtStart => cursor.col == 0,
        VerifyKind::CursorAtEnd => {
            let len = lines.get(cursor.row).map_or(0, |l| l.chars().count());
            cursor.col == len.saturating_sub(1)
        }
        VerifyKind::TextEquals => lines == goal_lines,
        VerifyKind::CursorAtPos => descriptor.goal_cursor == Some(cursor),
        VerifyKind::Unknown => false,
    }
}
