//! Player progress: one implicit profile, stored as JSON under
//! `$HOME/.vimdojo/`. Missing or corrupt data degrades to defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to write progress: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Next level to play; everything before it is completed.
    pub current_level_id: u32,
    pub xp: u32,
    pub badges: Vec<String>,
    /// Consecutive days with at least one completed level.
    pub streak: u32,
    pub last_played: Option<NaiveDate>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            current_level_id: 1,
            xp: 0,
            badges: Vec::new(),
            streak: 0,
            last_played: None,
        }
    }
}

impl PlayerProgress {
    pub fn completed_levels(&self) -> u32 {
        self.current_level_id.saturating_sub(1)
    }

    /// Record a pass of `level_id` on `today`. Only completing the frontier
    /// level advances the profile; replaying an old level earns nothing.
    pub fn record_completion(&mut self, level_id: u32, xp_award: u32, today: NaiveDate) {
        if level_id != self.current_level_id {
            return;
        }
        self.current_level_id += 1;
        self.xp += xp_award;
        self.touch_streak(today);
    }

    /// Award a badge once; repeats are ignored.
    pub fn award_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|b| b == badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        true
    }

    fn touch_streak(&mut self, today: NaiveDate) {
        match self.last_played {
            Some(last) if last == today => {}
            Some(last) if last.succ_opt() == Some(today) => self.streak += 1,
            _ => self.streak = 1,
        }
        self.last_played = Some(today);
    }
}

/// Loads and saves the single progress file.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `$HOME/.vimdojo/progress.json`. None when HOME is
    /// unset; the game then runs without persistence.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var("HOME")
            .ok()
            .map(|home| Path::new(&home).join(".vimdojo").join(PROGRESS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, falling back to a fresh one when the file is
    /// missing or unreadable.
    pub fn load(&self) -> PlayerProgress {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(progress) => progress,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "corrupt progress file, starting fresh");
                    PlayerProgress::default()
                }
            },
            Err(_) => PlayerProgress::default(),
        }
    }

    pub fn save(&self, progress: &PlayerProgress) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Reset progress by removing the file.
    pub fn clear(&self) -> Result<(), ProgressError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
