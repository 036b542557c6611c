//! Lesson catalogue: chapters of levels, embedded at build time.

use crate::engine::Cursor;
use crate::goal::GoalDescriptor;
use serde::Deserialize;
use thiserror::Error;

const BUILTIN_LEVELS: &str = include_str!("../assets/levels.json");

fn default_xp() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub hint: String,
    /// Keys worth practicing here, shown in the header. Advisory only:
    /// the engine accepts its whole vocabulary on every level.
    #[serde(default)]
    pub keys: Vec<String>,
    pub start_text: Vec<String>,
    #[serde(default)]
    pub goal_text: Vec<String>,
    #[serde(default)]
    pub start_cursor: Cursor,
    pub goal: GoalDescriptor,
    #[serde(default = "default_xp")]
    pub xp: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    /// Awarded once when the chapter's last level is completed.
    pub badge: String,
    pub levels: Vec<Level>,
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to parse level catalogue: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level catalogue contains no levels")]
    Empty,
    #[error("duplicate level id {0}")]
    DuplicateId(u32),
}

/// The full set of chapters, with flattened-lookup helpers.
#[derive(Debug, Clone)]
pub struct Catalogue {
    chapters: Vec<Chapter>,
}

impl Catalogue {
    /// Load the catalogue shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let chapters: Vec<Chapter> = serde_json::from_str(json)?;
        let catalogue = Self { chapters };
        if catalogue.levels().next().is_none() {
            return Err(CatalogueError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for level in catalogue.levels() {
            if !seen.insert(level.id) {
                return Err(CatalogueError::DuplicateId(level.id));
            }
        }
        Ok(catalogue)
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// All levels in play order, across chapters.
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.chapters.iter().flat_map(|c| c.levels.iter())
    }

    pub fn total_levels(&self) -> usize {
        self.levels().count()
    }

    pub fn level(&self, id: u32) -> Option<&Level> {
        self.levels().find(|l| l.id == id)
    }

    pub fn first_level_id(&self) -> Option<u32> {
        self.levels().next().map(|l| l.id)
    }

    /// The level played after `id`, in catalogue order.
    pub fn next_level_id(&self, id: u32) -> Option<u32> {
        let mut levels = self.levels();
        levels.find(|l| l.id == id)?;
        levels.next().map(|l| l.id)
    }

    pub fn chapter_of(&self, level_id: u32) -> Option<&Chapter> {
        self.chapters
            .iter()
            .find(|c| c.levels.iter().any(|l| l.id == level_id))
    }

    /// Whether `level_id` is the final level of its chapter.
    pub fn is_last_in_chapter(&self, level_id: u32) -> bool {
        self.chapter_of(level_id)
            .and_then(|c| c.levels.last())
            .is_some_and(|l| l.id == level_id)
    }
}
