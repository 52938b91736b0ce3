use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::session::SessionConfig;

/// Difficulties offered by the picker
pub const DIFFICULTY_CHOICES: RangeInclusive<i64> = 2..=12;

/// Question counts offered by the picker
pub const QUESTION_COUNT_CHOICES: [usize; 3] = [5, 10, 20];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub difficulty: i64,
    pub question_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: *DIFFICULTY_CHOICES.start(),
            question_count: QUESTION_COUNT_CHOICES[0],
        }
    }
}

impl Config {
    /// Pull values into what the pickers can show: difficulty is clamped,
    /// question count snaps to the nearest offered choice (lower on ties).
    pub fn normalized(self) -> Self {
        let difficulty = self
            .difficulty
            .clamp(*DIFFICULTY_CHOICES.start(), *DIFFICULTY_CHOICES.end());
        let question_count = QUESTION_COUNT_CHOICES
            .iter()
            .copied()
            .min_by_key(|c| c.abs_diff(self.question_count))
            .unwrap_or(QUESTION_COUNT_CHOICES[0]);
        Self {
            difficulty,
            question_count,
        }
    }
}

impl From<Config> for SessionConfig {
    fn from(cfg: Config) -> Self {
        SessionConfig::new(cfg.difficulty, cfg.question_count)
    }
}

/// Read-only source of user defaults; sessions are never written back
pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring malformed config {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }
}
