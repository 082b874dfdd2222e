//! Best times per level, persisted between runs.
//!
//! The table keeps the `max_entries` lowest times for each level in ascending
//! order. Persistence is fire-and-forget: if the store can't be read the board
//! starts empty, and if it can't be written the in-memory table stays
//! authoritative. Neither case ever reaches the player.

use crate::error::{MazeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_ENTRIES: usize = 5;

pub trait Leaderboard {
    fn add_score(&mut self, level_name: &str, seconds: f64);
    fn scores(&self, level_name: &str) -> Vec<f64>;
    fn clear(&mut self);

    fn listing(&self, level_names: &[&str]) -> LeaderboardListing {
        LeaderboardListing {
            sections: level_names
                .iter()
                .map(|name| (name.to_string(), self.scores(name)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    levels: BTreeMap<String, Vec<f64>>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `seconds` and trims the level to its best `max_entries`.
    /// Returns false for times that can't be ranked (negative or non-finite).
    pub fn insert(&mut self, level_name: &str, seconds: f64, max_entries: usize) -> bool {
        if !seconds.is_finite() || seconds < 0.0 {
            log::warn!("Ignoring unrankable time {seconds} for '{level_name}'");
            return false;
        }
        let times = self.levels.entry(level_name.to_string()).or_default();
        times.push(seconds);
        times.sort_by(f64::total_cmp);
        times.truncate(max_entries);
        true
    }

    pub fn get(&self, level_name: &str) -> &[f64] {
        self.levels.get(level_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Restores the ordering/size invariant on data read from outside.
    fn normalized(mut self, max_entries: usize) -> Self {
        for times in self.levels.values_mut() {
            times.retain(|t| t.is_finite() && *t >= 0.0);
            times.sort_by(f64::total_cmp);
            times.truncate(max_entries);
        }
        self
    }
}

/// Where a [`ScoreTable`] lives between sessions.
pub trait ScoreStore {
    fn load(&self) -> Result<ScoreTable>;
    fn save(&self, table: &ScoreTable) -> Result<()>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<ScoreTable> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ScoreTable::new()),
            Err(e) => return Err(MazeError::io(&self.path, e)),
        };
        serde_json::from_str(&raw).map_err(|e| MazeError::json(&self.path, e))
    }

    fn save(&self, table: &ScoreTable) -> Result<()> {
        let raw = serde_json::to_string_pretty(table).map_err(|e| MazeError::json(&self.path, e))?;
        fs::write(&self.path, raw).map_err(|e| MazeError::io(&self.path, e))
    }
}

/// Keeps nothing between sessions.
#[derive(Debug, Default)]
pub struct MemoryStore;

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<ScoreTable> {
        Ok(ScoreTable::new())
    }

    fn save(&self, _table: &ScoreTable) -> Result<()> {
        Ok(())
    }
}

pub struct PersistentLeaderboard<S: ScoreStore> {
    table: ScoreTable,
    store: S,
    max_entries: usize,
}

impl<S: ScoreStore> PersistentLeaderboard<S> {
    pub fn open(store: S, max_entries: usize) -> Self {
        let table = match store.load() {
            Ok(table) => table.normalized(max_entries),
            Err(err) => {
                log::warn!("Leaderboard unavailable, starting empty: {err}");
                ScoreTable::new()
            }
        };
        Self {
            table,
            store,
            max_entries,
        }
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.table) {
            log::warn!("Failed to save leaderboard: {err}");
        }
    }
}

impl<S: ScoreStore> Leaderboard for PersistentLeaderboard<S> {
    fn add_score(&mut self, level_name: &str, seconds: f64) {
        if self.table.insert(level_name, seconds, self.max_entries) {
            self.persist();
        }
    }

    fn scores(&self, level_name: &str) -> Vec<f64> {
        self.table.get(level_name).to_vec()
    }

    fn clear(&mut self) {
        self.table.clear();
        self.persist();
    }
}

/// Printable board: one section per level, best time first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardListing {
    pub sections: Vec<(String, Vec<f64>)>,
}

impl fmt::Display for LeaderboardListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Leaderboard")?;
        for (level, times) in &self.sections {
            writeln!(f, "{level}")?;
            for (rank, time) in times.iter().enumerate() {
                writeln!(f, "  {}. {:.2} seconds", rank + 1, time)?;
            }
        }
        Ok(())
    }
}
