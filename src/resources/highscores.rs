//! High-score table resource.
//!
//! [`HighScores`] maps a game name to its best score and keeps a backing
//! [`ScoreStorage`] in sync. The table is loaded once at startup and flushed
//! whole after every accepted update.
//!
//! # File Format
//!
//! One record per line, newline-terminated:
//!
//! ```text
//! ReflexGame:12
//! SnakeGame:31
//! ```
//!
//! Lines that do not parse are skipped. A missing file is an empty table.

use bevy_ecs::prelude::Resource;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Backing store for the serialized score table.
pub trait ScoreStorage: Send + Sync {
    /// Read the stored table. `Ok(None)` means nothing was stored yet.
    fn load(&self) -> io::Result<Option<String>>;
    /// Replace the stored table with `contents`.
    fn save(&self, contents: &str) -> io::Result<()>;
}

/// Score table stored in a text file.
///
/// Saving writes a sibling temporary file and renames it over the target,
/// so an interrupted write leaves the previous table intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStorage for FileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        let tmp = self.temp_path();
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)
    }
}

/// In-memory score table, shared between clones.
///
/// Useful when the table must not touch the disk; a clone kept aside can
/// inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Create a storage pre-filled with `text`.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(text.into()))),
        }
    }

    /// Last saved contents, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl ScoreStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        let mut slot = self
            .contents
            .lock()
            .map_err(|_| io::Error::other("score storage lock poisoned"))?;
        *slot = Some(contents.to_string());
        Ok(())
    }
}

/// Parse the score file format, skipping malformed lines.
pub fn parse_scores(text: &str) -> BTreeMap<String, u32> {
    let mut scores = BTreeMap::new();
    for line in text.lines() {
        let parsed = line.split_once(':').and_then(|(name, score)| {
            if name.is_empty() {
                return None;
            }
            score.trim().parse::<u32>().ok().map(|s| (name, s))
        });
        match parsed {
            Some((name, score)) => {
                debug!("Loaded score {} = {}", name, score);
                scores.insert(name.to_string(), score);
            }
            None => debug!("Skipping malformed score line {:?}", line),
        }
    }
    scores
}

/// Serialize a score table, one `name:score` line per entry.
pub fn format_scores(scores: &BTreeMap<String, u32>) -> String {
    scores
        .iter()
        .map(|(name, score)| format!("{}:{}\n", name, score))
        .collect()
}

/// Best score per game, persisted on every new record.
#[derive(Resource)]
pub struct HighScores {
    scores: BTreeMap<String, u32>,
    storage: Box<dyn ScoreStorage>,
}

impl HighScores {
    /// Load the table from `storage`.
    ///
    /// Missing data yields an empty table. A read error is logged and also
    /// yields an empty table.
    pub fn load(storage: impl ScoreStorage + 'static) -> Self {
        let scores = match storage.load() {
            Ok(Some(text)) => parse_scores(&text),
            Ok(None) => {
                info!("No score file yet, it will be created on the first record");
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Failed to read scores, starting empty: {}", e);
                BTreeMap::new()
            }
        };
        Self {
            scores,
            storage: Box::new(storage),
        }
    }

    /// Table backed by a fresh [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::load(MemoryStorage::default())
    }

    /// Best score for `game`, 0 when none was recorded.
    pub fn get(&self, game: &str) -> u32 {
        self.scores.get(game).copied().unwrap_or(0)
    }

    /// Record `score` for `game` if it beats the stored best.
    ///
    /// Returns `true` when the score was a new record. The whole table is
    /// flushed to storage after an accepted update.
    pub fn update(&mut self, game: &str, score: u32) -> bool {
        if score <= self.get(game) {
            return false;
        }
        self.scores.insert(game.to_string(), score);
        info!("New record for {}: {}", game, score);
        self.flush();
        true
    }

    /// Forget every record and flush the empty table.
    pub fn reset_all(&mut self) {
        self.scores.clear();
        self.flush();
        info!("All scores reset");
    }

    /// Read-only view of all records.
    pub fn entries(&self) -> &BTreeMap<String, u32> {
        &self.scores
    }

    fn flush(&self) {
        if let Err(e) = self.storage.save(&format_scores(&self.scores)) {
            error!("Failed to save scores: {}", e);
        }
    }
}
