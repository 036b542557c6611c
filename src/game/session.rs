use crate::engine::{Cursor, Engine};
use crate::goal::check_goal;
use crate::levels::{Catalogue, Level};
use crate::progress::{PlayerProgress, ProgressStore};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no such level: {0}")]
    UnknownLevel(u32),
    #[error("level catalogue is empty")]
    NoLevels,
}

/// What a single key did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key changed the visible buffer or cursor.
    Applied,
    /// The key was absorbed: pending sequence, no-op, or unknown.
    Absorbed,
    /// The key met the level goal.
    Passed { badge: Option<String> },
}

/// One play-through: the current level's working buffer, the interpreter,
/// and the player's profile.
pub struct GameSession {
    engine: Engine,
    catalogue: Catalogue,
    progress: PlayerProgress,
    store: Option<ProgressStore>,
    level: Level,
    lines: Vec<String>,
    cursor: Cursor,
    passed: bool,
    message: String,
}

impl GameSession {
    pub fn new(
        catalogue: Catalogue,
        progress: PlayerProgress,
        store: Option<ProgressStore>,
        start_level: Option<u32>,
    ) -> Result<Self, SessionError> {
        let start_id = match start_level {
            Some(id) => id,
            // Resume at the frontier; once everything is done, replay the
            // final level.
            None if catalogue.level(progress.current_level_id).is_some() => {
                progress.current_level_id
            }
            None => catalogue
                .levels()
                .last()
                .map(|l| l.id)
                .ok_or(SessionError::NoLevels)?,
        };
        let level = catalogue
            .level(start_id)
            .cloned()
            .ok_or(SessionError::UnknownLevel(start_id))?;

        let mut session = Self {
            engine: Engine::new(),
            catalogue,
            progress,
            store,
            level,
            lines: Vec::new(),
            cursor: Cursor::default(),
            passed: false,
            message: String::new(),
        };
        session.reset_level_state();
        Ok(session)
    }

    fn reset_level_state(&mut self) {
        self.lines = self.level.start_text.clone();
        self.cursor = self.level.start_cursor;
        self.engine.reset();
        self.passed = false;
        self.message.clear();
    }

    pub fn load_level(&mut self, id: u32) -> Result<(), SessionError> {
        self.level = self
            .catalogue
            .level(id)
            .cloned()
            .ok_or(SessionError::UnknownLevel(id))?;
        self.reset_level_state();
        Ok(())
    }

    /// Feed one key through the interpreter and re-check the goal.
    pub fn handle_key(&mut self, key: &str, today: NaiveDate) -> KeyOutcome {
        if self.passed {
            return KeyOutcome::Absorbed;
        }

        let result = self.engine.interpret(key, &self.lines, self.cursor);
        if !result.completed {
            return KeyOutcome::Absorbed;
        }
        self.lines = result.lines;
        self.cursor = result.cursor;

        if !check_goal(&self.level.goal, &self.lines, self.cursor, &self.level.goal_text) {
            return KeyOutcome::Applied;
        }

        self.passed = true;
        info!(level = self.level.id, "level passed");
        self.progress
            .record_completion(self.level.id, self.level.xp, today);

        let mut badge = None;
        if self.catalogue.is_last_in_chapter(self.level.id) {
            if let Some(chapter) = self.catalogue.chapter_of(self.level.id) {
                if self.progress.award_badge(&chapter.badge) {
                    self.message = format!("Badge earned: {}!", chapter.badge);
                    badge = Some(chapter.badge.clone());
                }
            }
        }

        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.progress) {
                warn!(%err, "failed to save progress");
            }
        }

        KeyOutcome::Passed { badge }
    }

    /// Replay the current level from its start state.
    pub fn restart(&mut self) {
        self.reset_level_state();
    }

    /// Move to the next level in catalogue order. False when there is none.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.catalogue.next_level_id(self.level.id) else {
            return false;
        };
        self.load_level(next).is_ok()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn chapter_title(&self) -> &str {
        self.catalogue
            .chapter_of(self.level.id)
            .map(|c| c.title.as_str())
            .unwrap_or("")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pending_display(&self) -> String {
        self.engine.pending_display()
    }

    /// True while an operator, finder, or `g` prefix awaits its next key.
    pub fn is_waiting_for_second_key(&self) -> bool {
        self.engine.is_waiting_for_second_key()
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn total_levels(&self) -> usize {
        self.catalogue.total_levels()
    }
}
